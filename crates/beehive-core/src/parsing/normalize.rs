use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;

/// Separator between segments of a normalized line.
pub const DELIMITER: char = '|';

static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+>").expect("valid markup tag regex"));

/// Flatten an annotation body into a single pipe-delimited plain-text line.
///
/// Steps:
/// 1. Line break tags become `|`
/// 2. All other tags are dropped, their text content kept
/// 3. Newlines become `|`
/// 4. `&nbsp;` becomes a plain space
/// 5. Trim
/// 6. Decode the remaining HTML entities
///
/// Broken markup is never an error: whatever does not look like a tag stays as text.
pub fn normalize_content(raw: &str) -> String {
    let s = LINE_BREAK_TAG.replace_all(raw, "|");
    let s = MARKUP_TAG.replace_all(&s, "");
    let s = s.replace("\r\n", "|").replace('\n', "|");
    let s = s.replace("&nbsp;", " ");
    decode_html_entities(s.trim()).into_owned()
}
