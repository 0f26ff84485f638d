use crate::error::BeehiveError;
use crate::manifest::Manifest;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

static VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)volume \d+$").expect("valid volume regex"));

/// IIIF region token meaning "the whole image".
const FULL_REGION: &str = "/full/";

/// Page metadata for a single canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasMetadata {
    pub canvas: String,
    /// Title of the work the canvas belongs to, if the manifest declared one.
    pub title: Option<String>,
    /// Full-resolution image URL.
    pub image_url: String,
}

impl CanvasMetadata {
    /// Trailing "Volume N" of the work title, as written; empty when absent.
    pub fn volume(&self) -> &str {
        self.title
            .as_deref()
            .and_then(|t| VOLUME.find(t.trim()))
            .map(|m| m.as_str())
            .unwrap_or("")
    }

    /// Last `_`-delimited token of the canvas identifier.
    pub fn image_number(&self) -> &str {
        self.canvas
            .trim_end_matches('_')
            .rsplit('_')
            .next()
            .unwrap_or_default()
    }

    /// Image URL cropped to `region` (`x,y,w,h`).
    ///
    /// Only the first `full` path segment (the region) is replaced; the size
    /// segment that follows keeps its `full`.
    pub fn selection_url(&self, region: &str) -> String {
        self.image_url.replacen(FULL_REGION, &format!("/{region}/"), 1)
    }
}

/// Region part of a selector value: `xywh=347,288,3070,287` gives `347,288,3070,287`.
pub fn selector_region(selector: &str) -> &str {
    selector.rsplit('=').next().unwrap_or(selector).trim()
}

/// Canvas lookup table, built once from the loaded manifests.
///
/// Read-only after construction, so it can be shared by reference across rows.
#[derive(Debug, Clone, Default)]
pub struct CanvasIndex {
    entries: Vec<CanvasMetadata>,
    by_canvas: HashMap<String, usize>,
}

impl CanvasIndex {
    /// Index every canvas of every manifest. A canvas listed twice keeps the
    /// data of the manifest loaded last.
    pub fn from_manifests(manifests: &[Manifest]) -> Self {
        let mut index = CanvasIndex::default();
        for manifest in manifests {
            for canvas in &manifest.canvases {
                index.insert(CanvasMetadata {
                    canvas: canvas.id.clone(),
                    title: manifest.title.clone(),
                    image_url: canvas.image_url.clone(),
                });
            }
        }
        index
    }

    fn insert(&mut self, meta: CanvasMetadata) {
        match self.by_canvas.get(&meta.canvas) {
            Some(&pos) => {
                warn!(canvas = %meta.canvas, "canvas listed in more than one manifest");
                self.entries[pos] = meta;
            }
            None => {
                self.by_canvas.insert(meta.canvas.clone(), self.entries.len());
                self.entries.push(meta);
            }
        }
    }

    pub fn get(&self, canvas: &str) -> Option<&CanvasMetadata> {
        self.by_canvas.get(canvas).map(|&pos| &self.entries[pos])
    }

    /// Look up a canvas, failing when no manifest listed it.
    pub fn resolve(&self, canvas: &str) -> Result<&CanvasMetadata, BeehiveError> {
        self.get(canvas)
            .ok_or_else(|| BeehiveError::CanvasNotFound(canvas.to_string()))
    }

    /// Canvases in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasMetadata> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestCanvas;

    const IMAGE: &str =
        "https://stacks.stanford.edu/image/iiif/ps974xt6740%2F1607_0454/full/full/0/default.jpg";

    fn meta(canvas: &str, title: Option<&str>) -> CanvasMetadata {
        CanvasMetadata {
            canvas: canvas.into(),
            title: title.map(String::from),
            image_url: IMAGE.into(),
        }
    }

    #[test]
    fn test_volume_from_title() {
        assert_eq!(meta("c", Some("Beehive Volume 1")).volume(), "Volume 1");
        assert_eq!(meta("c", Some("The Beehive. volume 12  ")).volume(), "volume 12");
        assert_eq!(meta("c", Some("Beehive")).volume(), "");
        assert_eq!(meta("c", Some("Volume 2 of the Beehive")).volume(), "");
        assert_eq!(meta("c", None).volume(), "");
    }

    #[test]
    fn test_image_number() {
        let m = meta(
            "https://purl.stanford.edu/ps974xt6740/iiif/canvas/ps974xt6740_1607_0454",
            None,
        );
        assert_eq!(m.image_number(), "0454");
        assert_eq!(meta("no-underscore", None).image_number(), "no-underscore");
    }

    #[test]
    fn test_selection_url_replaces_region_only() {
        let m = meta("c", None);
        assert_eq!(
            m.selection_url("347,288,3070,287"),
            "https://stacks.stanford.edu/image/iiif/ps974xt6740%2F1607_0454/347,288,3070,287/full/0/default.jpg"
        );
    }

    #[test]
    fn test_selector_region() {
        assert_eq!(selector_region("xywh=347,288,3070,287"), "347,288,3070,287");
        assert_eq!(selector_region("347,288,3070,287"), "347,288,3070,287");
    }

    fn manifest(title: &str, ids: &[&str]) -> Manifest {
        Manifest {
            location: format!("{title}.json"),
            title: Some(title.to_string()),
            canvases: ids
                .iter()
                .map(|id| ManifestCanvas {
                    id: id.to_string(),
                    image_url: format!("https://img/{id}/full/full/0/default.jpg"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_index_resolves_across_manifests() {
        let index = CanvasIndex::from_manifests(&[
            manifest("Beehive Volume 1", &["a_0001", "a_0002"]),
            manifest("Beehive Volume 2", &["b_0001"]),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.resolve("b_0001").unwrap().volume(), "Volume 2");
        assert_eq!(index.resolve("a_0002").unwrap().image_number(), "0002");
        let order: Vec<&str> = index.iter().map(|m| m.canvas.as_str()).collect();
        assert_eq!(order, ["a_0001", "a_0002", "b_0001"]);
    }

    #[test]
    fn test_unknown_canvas_is_an_error() {
        let index = CanvasIndex::from_manifests(&[manifest("Beehive Volume 1", &["a_0001"])]);
        let err = index.resolve("missing_0001").unwrap_err();
        assert!(matches!(err, BeehiveError::CanvasNotFound(ref c) if c == "missing_0001"));
    }

    #[test]
    fn test_duplicate_canvas_keeps_last() {
        let index = CanvasIndex::from_manifests(&[
            manifest("Beehive Volume 1", &["x_0001"]),
            manifest("Beehive Volume 2", &["x_0001"]),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve("x_0001").unwrap().volume(), "Volume 2");
    }
}
