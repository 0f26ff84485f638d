use crate::error::BeehiveError;
use crate::model::Annotation;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::{BufRead, Read};

/// One query solution: variable name to bound value.
pub type Binding = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct JsonResults {
    results: JsonBindings,
}

#[derive(Debug, Deserialize)]
struct JsonBindings {
    bindings: Vec<HashMap<String, JsonTerm>>,
}

#[derive(Debug, Deserialize)]
struct JsonTerm {
    value: String,
}

/// Read a SPARQL 1.1 JSON result document (`application/sparql-results+json`).
///
/// The document is decoded in one go; solutions are turned into annotations
/// lazily as the returned iterator is advanced.
pub fn read_json_results<R: Read>(
    reader: R,
) -> Result<impl Iterator<Item = Result<Annotation, BeehiveError>>, BeehiveError> {
    let parsed: JsonResults = serde_json::from_reader(reader).map_err(invalid)?;
    Ok(parsed.results.bindings.into_iter().map(|solution| {
        let binding: Binding = solution
            .into_iter()
            .map(|(var, term)| (var, term.value))
            .collect();
        annotation_from_binding(&binding)
    }))
}

/// Parse a complete SPARQL 1.1 JSON result document.
pub fn parse_json_results(json: &str) -> Result<Vec<Annotation>, BeehiveError> {
    read_json_results(json.as_bytes())?.collect()
}

/// Parse a complete SPARQL XML result document.
pub fn parse_xml_results(xml: &str) -> Result<Vec<Annotation>, BeehiveError> {
    XmlResults::new(xml.as_bytes()).collect()
}

/// Cursor over a SPARQL XML result document (`application/sparql-results+xml`).
///
/// Each `<result>` is yielded as soon as its closing tag has been read, so a
/// large result set never has to be held in memory. After the first error the
/// cursor is exhausted.
pub struct XmlResults<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    current: Option<Binding>,
    var: Option<String>,
    text: String,
    in_term: bool,
    done: bool,
}

impl<R: BufRead> XmlResults<R> {
    pub fn new(source: R) -> Self {
        XmlResults {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            current: None,
            var: None,
            text: String::new(),
            in_term: false,
            done: false,
        }
    }

    fn next_annotation(&mut self) -> Result<Option<Annotation>, BeehiveError> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf).map_err(invalid)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"result" => self.current = Some(Binding::new()),
                    b"binding" => {
                        let name = e
                            .try_get_attribute("name")
                            .map_err(invalid)?
                            .ok_or_else(|| invalid("binding without a name"))?;
                        self.var = Some(name.unescape_value().map_err(invalid)?.into_owned());
                    }
                    b"uri" | b"literal" | b"bnode" => {
                        self.in_term = true;
                        self.text.clear();
                    }
                    _ => {}
                },
                Event::Empty(e) => {
                    // <literal/> is an empty string
                    if e.local_name().as_ref() == b"literal" {
                        if let (Some(binding), Some(name)) = (self.current.as_mut(), self.var.as_ref()) {
                            binding.insert(name.clone(), String::new());
                        }
                    }
                }
                Event::Text(e) if self.in_term => {
                    self.text.push_str(&e.unescape().map_err(invalid)?);
                }
                Event::CData(e) if self.in_term => {
                    self.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"uri" | b"literal" | b"bnode" => {
                        self.in_term = false;
                        if let (Some(binding), Some(name)) = (self.current.as_mut(), self.var.as_ref()) {
                            binding.insert(name.clone(), std::mem::take(&mut self.text));
                        }
                    }
                    b"binding" => self.var = None,
                    b"result" => {
                        if let Some(binding) = self.current.take() {
                            return annotation_from_binding(&binding).map(Some);
                        }
                    }
                    _ => {}
                },
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for XmlResults<R> {
    type Item = Result<Annotation, BeehiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_annotation() {
            Ok(Some(annotation)) => Some(Ok(annotation)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn invalid(e: impl std::fmt::Display) -> BeehiveError {
    BeehiveError::ResultsInvalid(e.to_string())
}

/// Build an annotation from one solution.
///
/// `annotation` and `canvas` must be bound; `content` defaults to empty and
/// `coordinates` stays absent when the solution has no region selector.
pub fn annotation_from_binding(binding: &Binding) -> Result<Annotation, BeehiveError> {
    let required = |var: &str| {
        binding
            .get(var)
            .cloned()
            .ok_or_else(|| BeehiveError::ResultsInvalid(format!("solution without ?{var}")))
    };

    Ok(Annotation {
        uri: required("annotation")?,
        content: binding.get("content").cloned().unwrap_or_default(),
        canvas: required("canvas")?,
        coordinates: binding.get("coordinates").cloned(),
    })
}
