use crate::error::BeehiveError;
use crate::store::results::{read_json_results, XmlResults};
use crate::store::{AnnotationSource, AnnotationStream};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Annotation backend reading a saved query result set.
///
/// Files ending in `.xml` or `.srx` are read as SPARQL XML results, anything
/// else as SPARQL JSON results.
pub struct ResultsFileSource {
    path: PathBuf,
}

impl ResultsFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultsFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_xml(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("xml") || ext.eq_ignore_ascii_case("srx"))
            .unwrap_or(false)
    }
}

impl AnnotationSource for ResultsFileSource {
    fn annotations(&self) -> Result<AnnotationStream<'_>, BeehiveError> {
        let file = BufReader::new(File::open(&self.path)?);
        if self.is_xml() {
            Ok(Box::new(XmlResults::new(file)))
        } else {
            Ok(Box::new(read_json_results(file)?))
        }
    }

    fn source_name(&self) -> &str {
        "file"
    }
}
