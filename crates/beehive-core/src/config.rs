use crate::error::BeehiveError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// The three volumes of the Beehive commonplace book.
pub const DEFAULT_MANIFESTS: &[&str] = &[
    "https://purl.stanford.edu/ps974xt6740/iiif/manifest.json",
    "https://purl.stanford.edu/fm855tg5659/iiif/manifest.json",
    "https://purl.stanford.edu/gw497tq8651/iiif/manifest.json",
];

pub const DEFAULT_SPARQL_ENDPOINT: &str = "http://localhost:3030/beehive";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for an export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Manifest URLs or local paths, loaded in order.
    pub manifests: Vec<String>,
    pub sparql_endpoint: String,
    /// Timeout for each HTTP request.
    pub timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            manifests: DEFAULT_MANIFESTS.iter().map(|s| s.to_string()).collect(),
            sparql_endpoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ExportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load a config from a TOML file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<ExportConfig, BeehiveError> {
    let content = std::fs::read_to_string(path).map_err(|e| BeehiveError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a TOML string.
pub fn parse_config(toml_str: &str, source: &Path) -> Result<ExportConfig, BeehiveError> {
    let config: ExportConfig = toml::from_str(toml_str).map_err(|e| BeehiveError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config can drive an export.
pub fn validate_config(config: &ExportConfig) -> Result<(), BeehiveError> {
    if config.manifests.is_empty() {
        return Err(BeehiveError::ConfigInvalid(
            "at least one manifest is required".into(),
        ));
    }

    if config.manifests.iter().any(|m| m.trim().is_empty()) {
        return Err(BeehiveError::ConfigInvalid(
            "manifest locations must not be empty".into(),
        ));
    }

    if config.sparql_endpoint.trim().is_empty() {
        return Err(BeehiveError::ConfigInvalid(
            "sparql_endpoint must not be empty".into(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(BeehiveError::ConfigInvalid(
            "timeout_secs must be greater than zero".into(),
        ));
    }

    Ok(())
}
