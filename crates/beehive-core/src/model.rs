use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic field an annotation segment can be classified into.
///
/// Variant order is the column order of the CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Head,
    Entry,
    Topic,
    Page,
    Add,
    Xref,
    See,
    Index,
    Item,
    Unparsed,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Head,
        Field::Entry,
        Field::Topic,
        Field::Page,
        Field::Add,
        Field::Xref,
        Field::See,
        Field::Index,
        Field::Item,
        Field::Unparsed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Head => "head",
            Field::Entry => "entry",
            Field::Topic => "topic",
            Field::Page => "page",
            Field::Add => "add",
            Field::Xref => "xref",
            Field::See => "see",
            Field::Index => "index",
            Field::Item => "item",
            Field::Unparsed => "unparsed",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified values of one annotation, before aggregation.
///
/// Each field keeps its values in order of appearance. A field that never
/// occurred in the source has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// The normalized line the record was classified from, kept verbatim.
    pub line: String,
    pub fields: BTreeMap<Field, Vec<String>>,
}

impl FieldRecord {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Append a value to a field, creating the field on first use.
    pub fn push(&mut self, field: Field, value: impl Into<String>) {
        self.fields.entry(field).or_default().push(value.into());
    }

    pub fn values(&self, field: Field) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }
}

/// Aggregated content of one annotation: every present field pipe-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContent {
    pub line: String,
    pub fields: BTreeMap<Field, String>,
}

impl ParsedContent {
    /// Joined value for a field, or the empty string when the field is absent.
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }
}

/// One annotation solution as delivered by the upstream store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub uri: String,
    pub content: String,
    pub canvas: String,
    /// Region selector value, e.g. `xywh=347,288,3070,287`.
    #[serde(default)]
    pub coordinates: Option<String>,
}

/// Column names of the exported CSV, in order.
pub const COLUMNS: [&str; 16] = [
    "volume",
    "image_number",
    "head",
    "entry",
    "topic",
    "page",
    "add",
    "xref",
    "see",
    "index",
    "item",
    "unparsed",
    "line",
    "selection",
    "full_image",
    "annotation_uri",
];

/// A fully resolved CSV row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub volume: String,
    pub image_number: String,
    pub head: String,
    pub entry: String,
    pub topic: String,
    pub page: String,
    pub add: String,
    pub xref: String,
    pub see: String,
    pub index: String,
    pub item: String,
    pub unparsed: String,
    pub line: String,
    pub selection: String,
    pub full_image: String,
    pub annotation_uri: String,
}

impl OutputRow {
    /// Copy the aggregated annotation fields into their columns.
    pub fn with_content(mut self, content: &ParsedContent) -> Self {
        self.head = content.get(Field::Head).to_string();
        self.entry = content.get(Field::Entry).to_string();
        self.topic = content.get(Field::Topic).to_string();
        self.page = content.get(Field::Page).to_string();
        self.add = content.get(Field::Add).to_string();
        self.xref = content.get(Field::Xref).to_string();
        self.see = content.get(Field::See).to_string();
        self.index = content.get(Field::Index).to_string();
        self.item = content.get(Field::Item).to_string();
        self.unparsed = content.get(Field::Unparsed).to_string();
        self.line = content.line.clone();
        self
    }

    /// Cells in [`COLUMNS`] order.
    pub fn to_record(&self) -> [&str; 16] {
        [
            self.volume.as_str(),
            self.image_number.as_str(),
            self.head.as_str(),
            self.entry.as_str(),
            self.topic.as_str(),
            self.page.as_str(),
            self.add.as_str(),
            self.xref.as_str(),
            self.see.as_str(),
            self.index.as_str(),
            self.item.as_str(),
            self.unparsed.as_str(),
            self.line.as_str(),
            self.selection.as_str(),
            self.full_image.as_str(),
            self.annotation_uri.as_str(),
        ]
    }
}
