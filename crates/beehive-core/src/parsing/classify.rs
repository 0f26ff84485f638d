use crate::model::{Field, FieldRecord};
use crate::parsing::normalize::DELIMITER;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static STRUCTURED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)entry:|head:").expect("valid structure marker regex"));

static LABEL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s+").expect("valid label separator regex"));

/// How a normalized line is decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `Label: value` segments, classified one by one.
    Structured,
    /// Free text; every segment lands in `unparsed`.
    Unstructured,
}

/// A line is structured when it mentions `Entry:` or `Head:` anywhere (any case).
pub fn detect_layout(line: &str) -> Layout {
    if STRUCTURED_MARKER.is_match(line) {
        Layout::Structured
    } else {
        Layout::Unstructured
    }
}

/// One delimiter-separated unit of a structured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub label: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> Segment<'a> {
    /// Split on the first colon followed by whitespace.
    pub fn parse(text: &'a str) -> Self {
        let mut parts = LABEL_SEPARATOR.splitn(text, 2);
        let label = parts.next().unwrap_or_default();
        Segment {
            label,
            value: parts.next(),
        }
    }

    /// The value part, falling back to the label when the segment has no colon.
    fn value_or_label(&self) -> &'a str {
        self.value.unwrap_or(self.label)
    }

    /// Label minus its first whitespace-delimited token; empty when nothing follows it.
    fn label_tail(&self) -> &'a str {
        match self.label.split_once(char::is_whitespace) {
            Some((_, rest)) => rest.trim_start(),
            None => self.label,
        }
    }

    fn rejoined(&self) -> String {
        match self.value {
            Some(value) => format!("{} {}", self.label, value),
            None => self.label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LabelPattern {
    /// Case-insensitive prefix.
    Prefix(&'static str),
    /// Case-insensitive whole label.
    Exact(&'static str),
    /// Case-insensitive prefix directly followed by whitespace.
    Word(&'static str),
}

impl LabelPattern {
    fn matches(&self, label: &str) -> bool {
        match *self {
            LabelPattern::Prefix(prefix) => starts_with_ignore_case(label, prefix),
            LabelPattern::Exact(word) => label.eq_ignore_ascii_case(word),
            LabelPattern::Word(word) => {
                starts_with_ignore_case(label, word)
                    && label[word.len()..]
                        .chars()
                        .next()
                        .is_some_and(char::is_whitespace)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ValueSource {
    ValueOrLabel,
    LabelTail,
    Label,
}

struct LabelRule {
    pattern: LabelPattern,
    field: Field,
    value: ValueSource,
}

const fn rule(pattern: LabelPattern, field: Field, value: ValueSource) -> LabelRule {
    LabelRule {
        pattern,
        field,
        value,
    }
}

/// Label rules in priority order; the first match wins.
static RULES: [LabelRule; 10] = [
    rule(LabelPattern::Prefix("Head"), Field::Head, ValueSource::ValueOrLabel),
    rule(LabelPattern::Prefix("Entry"), Field::Entry, ValueSource::ValueOrLabel),
    rule(LabelPattern::Prefix("Topic"), Field::Topic, ValueSource::ValueOrLabel),
    rule(LabelPattern::Prefix("Page"), Field::Page, ValueSource::ValueOrLabel),
    rule(LabelPattern::Prefix("Add"), Field::Add, ValueSource::ValueOrLabel),
    rule(LabelPattern::Prefix("Xref"), Field::Xref, ValueSource::ValueOrLabel),
    rule(LabelPattern::Prefix("Index"), Field::Index, ValueSource::ValueOrLabel),
    rule(LabelPattern::Exact("See"), Field::See, ValueSource::ValueOrLabel),
    rule(LabelPattern::Word("See"), Field::See, ValueSource::LabelTail),
    rule(LabelPattern::Prefix("#item"), Field::Item, ValueSource::Label),
];

/// Classify a single segment into a field and the value to record for it.
///
/// Segments no rule recognizes go to `unparsed` with label and value rejoined.
pub fn classify_segment(segment: &Segment<'_>) -> (Field, String) {
    for label_rule in &RULES {
        if label_rule.pattern.matches(segment.label) {
            let value = match label_rule.value {
                ValueSource::ValueOrLabel => segment.value_or_label(),
                ValueSource::LabelTail => segment.label_tail(),
                ValueSource::Label => segment.label,
            };
            return (label_rule.field, value.to_string());
        }
    }
    (Field::Unparsed, segment.rejoined())
}

/// Split a normalized line into fields.
pub fn classify_line(line: &str) -> FieldRecord {
    let mut record = FieldRecord::new(line);

    match detect_layout(line) {
        Layout::Structured => {
            for text in line.split(DELIMITER).map(str::trim) {
                if text.is_empty() {
                    continue;
                }
                let (field, value) = classify_segment(&Segment::parse(text));
                record.push(field, value);
            }
        }
        Layout::Unstructured => {
            // Only pieces that are empty before trimming count as trailing gaps
            let mut pieces: Vec<&str> = line.split(DELIMITER).collect();
            while pieces.last().is_some_and(|p| p.is_empty()) {
                pieces.pop();
            }
            for piece in pieces {
                record.push(Field::Unparsed, piece.trim());
            }
        }
    }

    record
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> (Field, String) {
        classify_segment(&Segment::parse(text))
    }

    #[test]
    fn test_segment_parse() {
        let seg = Segment::parse("XRef: 1345 [Exercise]");
        assert_eq!(seg.label, "XRef");
        assert_eq!(seg.value, Some("1345 [Exercise]"));

        let seg = Segment::parse("#item-a147ed4b8");
        assert_eq!(seg.label, "#item-a147ed4b8");
        assert_eq!(seg.value, None);
    }

    #[test]
    fn test_segment_parse_splits_once() {
        let seg = Segment::parse("Entry: Note: see margin");
        assert_eq!(seg.label, "Entry");
        assert_eq!(seg.value, Some("Note: see margin"));
    }

    #[test]
    fn test_colon_without_space_is_not_a_label() {
        let seg = Segment::parse("Entry:1406");
        assert_eq!(seg.label, "Entry:1406");
        assert_eq!(seg.value, None);
        assert_eq!(classify("Entry:1406"), (Field::Entry, "Entry:1406".into()));
    }

    #[test]
    fn test_label_prefixes_case_insensitive() {
        assert_eq!(classify("HEAD: terms"), (Field::Head, "terms".into()));
        assert_eq!(classify("entry: 1406"), (Field::Entry, "1406".into()));
        assert_eq!(classify("Topics: Salt"), (Field::Topic, "Salt".into()));
        assert_eq!(classify("Page: 12"), (Field::Page, "12".into()));
        assert_eq!(classify("Addendum: x"), (Field::Add, "x".into()));
        assert_eq!(classify("XRef: 1983"), (Field::Xref, "1983".into()));
        assert_eq!(classify("index: atheism"), (Field::Index, "atheism".into()));
    }

    #[test]
    fn test_see_exact_takes_value() {
        assert_eq!(classify("See: foo"), (Field::See, "foo".into()));
        assert_eq!(classify("see: foo"), (Field::See, "foo".into()));
    }

    #[test]
    fn test_see_followed_by_text_drops_first_word() {
        assert_eq!(classify("See also bar"), (Field::See, "also bar".into()));
        assert_eq!(classify("See  Courage"), (Field::See, "Courage".into()));
    }

    #[test]
    fn test_see_also_with_colon_keeps_label_tail_only() {
        assert_eq!(classify("See also: Valour"), (Field::See, "also".into()));
    }

    #[test]
    fn test_see_with_spaced_colon_has_empty_value() {
        assert_eq!(classify("See : Courage"), (Field::See, String::new()));
        assert_eq!(classify("See \t"), (Field::See, String::new()));
    }

    #[test]
    fn test_see_without_space_is_unparsed() {
        assert_eq!(classify("SeeAlso foo"), (Field::Unparsed, "SeeAlso foo".into()));
    }

    #[test]
    fn test_item_keeps_label() {
        assert_eq!(classify("#item-abc123"), (Field::Item, "#item-abc123".into()));
        assert_eq!(classify("#ITEM-abc123"), (Field::Item, "#ITEM-abc123".into()));
    }

    #[test]
    fn test_unknown_label_rejoined() {
        assert_eq!(classify("Note: faded ink"), (Field::Unparsed, "Note faded ink".into()));
        assert_eq!(classify("a"), (Field::Unparsed, "a".into()));
    }

    #[test]
    fn test_bare_label_uses_label_as_value() {
        assert_eq!(classify("Head"), (Field::Head, "Head".into()));
    }

    #[test]
    fn test_detect_layout() {
        assert_eq!(detect_layout("Entry: a"), Layout::Structured);
        assert_eq!(detect_layout("x|HEAD: y"), Layout::Structured);
        assert_eq!(detect_layout("Topic: a|Index: b"), Layout::Unstructured);
        assert_eq!(detect_layout("Entry 12"), Layout::Unstructured);
    }

    #[test]
    fn test_classify_line_execution() {
        let record = classify_line("Entry: Execution|Topic: Execution|Index: execution|#item-a147ed4b8");
        assert_eq!(record.values(Field::Entry), ["Execution"]);
        assert_eq!(record.values(Field::Topic), ["Execution"]);
        assert_eq!(record.values(Field::Index), ["execution"]);
        assert_eq!(record.values(Field::Item), ["#item-a147ed4b8"]);
        assert_eq!(record.fields.len(), 4);
        assert!(!record.contains(Field::Unparsed));
    }

    #[test]
    fn test_classify_line_repeated_fields_append() {
        let record = classify_line(
            "Entry: Exorcism|Topic: Exorcism|XRef: Conjuration|XRef: 1541 [Conjuring]|XRef: 1551 [Gafers]|Index: exorcism|#item-a42a0b906",
        );
        assert_eq!(
            record.values(Field::Xref),
            ["Conjuration", "1541 [Conjuring]", "1551 [Gafers]"]
        );
    }

    #[test]
    fn test_classify_line_skips_empty_segments() {
        let record = classify_line("Head: terms|| |Entry: 537|");
        assert_eq!(record.values(Field::Head), ["terms"]);
        assert_eq!(record.values(Field::Entry), ["537"]);
        assert!(!record.contains(Field::Unparsed));
    }

    #[test]
    fn test_classify_line_unstructured() {
        let record = classify_line("Topic: Salt | Index: salt |");
        assert_eq!(record.values(Field::Unparsed), ["Topic: Salt", "Index: salt"]);
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.line, "Topic: Salt | Index: salt |");
    }

    #[test]
    fn test_classify_line_unstructured_keeps_inner_gaps() {
        let record = classify_line("a||b");
        assert_eq!(record.values(Field::Unparsed), ["a", "", "b"]);
    }

    #[test]
    fn test_classify_line_unstructured_keeps_blank_trailing_piece() {
        let record = classify_line("a| |");
        assert_eq!(record.values(Field::Unparsed), ["a", ""]);

        let record = classify_line("a| ||");
        assert_eq!(record.values(Field::Unparsed), ["a", ""]);
    }

    #[test]
    fn test_classify_line_empty() {
        let record = classify_line("");
        assert!(record.fields.is_empty());
        assert_eq!(record.line, "");
    }

    #[test]
    fn test_structured_values_preserve_segment_order() {
        let line = "Head: terms|Entry: 537 [WORD_ILLEGIBLE]|Note: x|Entry: 1364 [Casuists]|#item-621de2bf5";
        let record = classify_line(line);
        let classified: usize = record.fields.values().map(Vec::len).sum();
        let segments = line.split('|').filter(|s| !s.trim().is_empty()).count();
        assert_eq!(classified, segments);
        assert_eq!(
            record.values(Field::Entry),
            ["537 [WORD_ILLEGIBLE]", "1364 [Casuists]"]
        );
    }
}
