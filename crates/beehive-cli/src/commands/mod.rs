pub mod canvases;
pub mod export;
pub mod parse;

use beehive_core::config::{self, ExportConfig};
use beehive_core::error::BeehiveError;
use beehive_core::manifest::{DefaultManifestFetcher, HttpManifestFetcher};
use std::path::PathBuf;

/// Build the effective config: file (or defaults), then command-line overrides.
pub fn resolve_config(
    config_file: Option<PathBuf>,
    manifests: Vec<String>,
    endpoint: Option<String>,
) -> Result<ExportConfig, BeehiveError> {
    let mut config = match config_file {
        Some(path) => config::load_config(&path)?,
        None => ExportConfig::default(),
    };

    if !manifests.is_empty() {
        config.manifests = manifests;
    }
    if let Some(endpoint) = endpoint {
        config.sparql_endpoint = endpoint;
    }

    config::validate_config(&config)?;
    Ok(config)
}

pub fn manifest_fetcher(config: &ExportConfig) -> Result<DefaultManifestFetcher, BeehiveError> {
    Ok(DefaultManifestFetcher::new(HttpManifestFetcher::new(
        config.timeout(),
    )?))
}
