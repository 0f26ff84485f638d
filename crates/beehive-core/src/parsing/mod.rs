pub mod aggregate;
pub mod classify;
pub mod normalize;

use crate::model::{FieldRecord, ParsedContent};
use aggregate::aggregate;
use classify::classify_line;
use normalize::normalize_content;

/// Normalize and classify a raw annotation body, keeping every value per field.
pub fn parse_record(raw: &str) -> FieldRecord {
    classify_line(&normalize_content(raw))
}

/// Parse a raw annotation body into its aggregated fields.
///
/// Runs normalizer, classifier and aggregator in sequence. Never fails: text
/// that matches no label still ends up in `unparsed`.
pub fn parse_content(raw: &str) -> ParsedContent {
    aggregate(&parse_record(raw))
}
