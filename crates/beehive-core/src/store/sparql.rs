use crate::error::BeehiveError;
use crate::store::results::{read_json_results, XmlResults};
use crate::store::{AnnotationSource, AnnotationStream, ANNOTATION_QUERY};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::io::BufReader;
use std::time::Duration;
use tracing::{debug, info};

/// XML preferred, JSON accepted.
const RESULT_FORMATS: &str =
    "application/sparql-results+xml, application/sparql-results+json;q=0.9";

/// Annotation backend querying a SPARQL endpoint over HTTP.
pub struct SparqlAnnotationSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl SparqlAnnotationSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, BeehiveError> {
        let endpoint = endpoint.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BeehiveError::QueryFailed {
                endpoint: endpoint.clone(),
                reason: format!("could not build HTTP client: {e}"),
            })?;
        Ok(SparqlAnnotationSource { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnnotationSource for SparqlAnnotationSource {
    fn annotations(&self) -> Result<AnnotationStream<'_>, BeehiveError> {
        debug!(endpoint = %self.endpoint, "running annotation query");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, RESULT_FORMATS)
            .form(&[("query", ANNOTATION_QUERY)])
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| BeehiveError::QueryFailed {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("json"));
        info!(endpoint = %self.endpoint, json = is_json, "annotation query answered");

        if is_json {
            Ok(Box::new(read_json_results(response)?))
        } else {
            Ok(Box::new(XmlResults::new(BufReader::new(response))))
        }
    }

    fn source_name(&self) -> &str {
        "sparql"
    }
}
