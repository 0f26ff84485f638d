use crate::error::BeehiveError;
use crate::manifest::ManifestFetcher;
use serde_json::Value;

/// Manifest backend reading manifests saved on disk.
pub struct FileManifestFetcher;

impl ManifestFetcher for FileManifestFetcher {
    fn fetch(&self, location: &str) -> Result<Value, BeehiveError> {
        let content =
            std::fs::read_to_string(location).map_err(|e| BeehiveError::ManifestFetch {
                location: location.to_string(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| BeehiveError::ManifestInvalid {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }

    fn backend_name(&self) -> &str {
        "file"
    }
}
