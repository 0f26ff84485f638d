use crate::model::{FieldRecord, ParsedContent};
use crate::parsing::normalize::DELIMITER;

/// Collapse each field's values into one pipe-joined string.
///
/// Fields without values are left out rather than rendered as an empty join.
pub fn aggregate(record: &FieldRecord) -> ParsedContent {
    let sep = DELIMITER.to_string();

    let fields = record
        .fields
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(field, values)| (*field, values.join(sep.as_str())))
        .collect();

    ParsedContent {
        line: record.line.clone(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn test_joins_in_insertion_order() {
        let mut record = FieldRecord::new("line");
        record.push(Field::Xref, "Skill");
        record.push(Field::Xref, "1345 [Experience]");
        record.push(Field::Entry, "Experience");
        let parsed = aggregate(&record);
        assert_eq!(parsed.get(Field::Xref), "Skill|1345 [Experience]");
        assert_eq!(parsed.get(Field::Entry), "Experience");
        assert_eq!(parsed.line, "line");
    }

    #[test]
    fn test_empty_lists_are_omitted() {
        let mut record = FieldRecord::new("");
        record.fields.insert(Field::Head, Vec::new());
        let parsed = aggregate(&record);
        assert!(parsed.fields.is_empty());
        assert_eq!(parsed.get(Field::Head), "");
    }

    #[test]
    fn test_idempotent() {
        let mut record = FieldRecord::new("Entry: a|Entry: b");
        record.push(Field::Entry, "a");
        record.push(Field::Entry, "b");
        assert_eq!(aggregate(&record), aggregate(&record));
    }
}
