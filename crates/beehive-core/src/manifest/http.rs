use crate::error::BeehiveError;
use crate::manifest::ManifestFetcher;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Manifest backend that downloads manifests over HTTP.
pub struct HttpManifestFetcher {
    client: reqwest::blocking::Client,
}

impl HttpManifestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, BeehiveError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BeehiveError::ManifestFetch {
                location: String::new(),
                reason: format!("could not build HTTP client: {e}"),
            })?;
        Ok(HttpManifestFetcher { client })
    }
}

impl ManifestFetcher for HttpManifestFetcher {
    fn fetch(&self, location: &str) -> Result<Value, BeehiveError> {
        debug!(location, "fetching manifest");
        let fetch_error = |e: reqwest::Error| BeehiveError::ManifestFetch {
            location: location.to_string(),
            reason: e.to_string(),
        };

        self.client
            .get(location)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(fetch_error)?
            .json::<Value>()
            .map_err(fetch_error)
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}
