pub mod file;
pub mod results;
pub mod sparql;

use crate::error::BeehiveError;
use crate::model::Annotation;

pub use file::ResultsFileSource;
pub use results::XmlResults;
pub use sparql::SparqlAnnotationSource;

/// Selects every annotation with its text, target canvas and region selector.
pub const ANNOTATION_QUERY: &str = r#"PREFIX oa: <http://www.w3.org/ns/oa#>
PREFIX cnt: <http://www.w3.org/2011/content#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
SELECT ?annotation ?content ?canvas ?coordinates
WHERE {
  ?annotation rdf:type oa:Annotation ;
              oa:hasBody ?body ;
              oa:hasTarget ?target .
  ?body cnt:chars ?content .
  ?target oa:hasSource ?canvas .
  OPTIONAL {
    ?target oa:hasSelector ?selector .
    ?selector rdf:type oa:FragmentSelector ;
              rdf:value ?coordinates .
  }
}"#;

/// Cursor over annotations in the order the store returns them.
///
/// Query-level failures are reported when the cursor is opened; a malformed
/// solution surfaces as an `Err` item.
pub type AnnotationStream<'a> = Box<dyn Iterator<Item = Result<Annotation, BeehiveError>> + 'a>;

/// Trait for annotation query backends.
pub trait AnnotationSource {
    /// Run the query and open a cursor over its solutions.
    fn annotations(&self) -> Result<AnnotationStream<'_>, BeehiveError>;

    /// Name of this backend (for diagnostics).
    fn source_name(&self) -> &str;
}

/// In-memory source, mostly useful for tests and pre-loaded data.
impl AnnotationSource for Vec<Annotation> {
    fn annotations(&self) -> Result<AnnotationStream<'_>, BeehiveError> {
        Ok(Box::new(self.iter().cloned().map(Ok)))
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}
