pub mod file;
pub mod http;

use crate::error::BeehiveError;
use serde_json::Value;
use tracing::warn;

pub use file::FileManifestFetcher;
pub use http::HttpManifestFetcher;

/// A single canvas listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestCanvas {
    pub id: String,
    pub image_url: String,
}

/// The parts of a IIIF manifest the export needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Where the manifest was loaded from (URL or path).
    pub location: String,
    pub title: Option<String>,
    pub canvases: Vec<ManifestCanvas>,
}

impl Manifest {
    /// Read title and canvases from a IIIF Presentation manifest.
    ///
    /// The title is the metadata value labelled "Title". Canvases come from the
    /// first `canvases` array found in the document; each contributes its id and
    /// the URL of its first image. Canvases without an image are skipped.
    pub fn from_json(location: &str, json: &Value) -> Result<Self, BeehiveError> {
        if !json.is_object() {
            return Err(BeehiveError::ManifestInvalid {
                location: location.to_string(),
                reason: "manifest is not a JSON object".into(),
            });
        }

        let title = find_title(json);

        let canvases = match find_first_key(json, "canvases") {
            None => Vec::new(),
            Some(Value::Array(items)) => {
                let mut canvases = Vec::with_capacity(items.len());
                for item in items {
                    let id = item
                        .get("@id")
                        .or_else(|| item.get("id"))
                        .and_then(Value::as_str)
                        .ok_or_else(|| BeehiveError::ManifestInvalid {
                            location: location.to_string(),
                            reason: "canvas without an id".into(),
                        })?;
                    match first_image_url(item) {
                        Some(image_url) => canvases.push(ManifestCanvas {
                            id: id.to_string(),
                            image_url: image_url.to_string(),
                        }),
                        None => warn!(manifest = location, canvas = id, "canvas has no image, skipping"),
                    }
                }
                canvases
            }
            Some(_) => {
                return Err(BeehiveError::ManifestInvalid {
                    location: location.to_string(),
                    reason: "'canvases' is not an array".into(),
                })
            }
        };

        Ok(Manifest {
            location: location.to_string(),
            title,
            canvases,
        })
    }
}

/// Trait for manifest retrieval backends.
pub trait ManifestFetcher: Send + Sync {
    /// Load the manifest JSON found at `location`.
    fn fetch(&self, location: &str) -> Result<Value, BeehiveError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Fetches `http(s)://` locations over the network and everything else from disk.
pub struct DefaultManifestFetcher {
    http: HttpManifestFetcher,
    file: FileManifestFetcher,
}

impl DefaultManifestFetcher {
    pub fn new(http: HttpManifestFetcher) -> Self {
        DefaultManifestFetcher {
            http,
            file: FileManifestFetcher,
        }
    }
}

impl ManifestFetcher for DefaultManifestFetcher {
    fn fetch(&self, location: &str) -> Result<Value, BeehiveError> {
        if is_remote(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }

    fn backend_name(&self) -> &str {
        "default"
    }
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn find_title(json: &Value) -> Option<String> {
    json.get("metadata")?
        .as_array()?
        .iter()
        .find(|entry| {
            entry
                .get("label")
                .and_then(text_of)
                .is_some_and(|label| label == "Title")
        })
        .and_then(|entry| entry.get("value"))
        .and_then(text_of)
}

/// Plain text of a metadata label or value.
///
/// Accepts a bare string, a `{"@value": ...}` object, a language map, or an
/// array of any of these (the first usable element wins).
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(text_of),
        Value::Object(map) => match map.get("@value") {
            Some(v) => text_of(v),
            None => map.values().find_map(text_of),
        },
        _ => None,
    }
}

/// Depth-first search for the first value stored under `key`.
fn find_first_key<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    match json {
        Value::Object(map) => {
            if let Some(found) = map.get(key) {
                return Some(found);
            }
            map.values().find_map(|v| find_first_key(v, key))
        }
        Value::Array(items) => items.iter().find_map(|v| find_first_key(v, key)),
        _ => None,
    }
}

fn first_image_url(canvas: &Value) -> Option<&str> {
    let image = canvas.get("images")?.as_array()?.first()?;
    let resource = image.get("resource")?;
    resource
        .get("@id")
        .or_else(|| resource.get("id"))
        .and_then(Value::as_str)
}
