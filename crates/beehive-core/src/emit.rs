use crate::error::BeehiveError;
use crate::model::{OutputRow, COLUMNS};
use std::io::Write;

/// Text of the row placed right after the header. Its non-ASCII character makes
/// spreadsheet imports detect UTF-8 before they reach the data.
pub const SENTINEL_NOTE: &str =
    "Force Google Sheets to read CSV as UTF-8: büngt; if UTF-8 occurs too late, CSV will be read as ASCII";

/// The fixed row emitted between the header and the data.
pub fn sentinel_row() -> OutputRow {
    OutputRow {
        volume: "Volume 0".into(),
        image_number: "0".into(),
        unparsed: SENTINEL_NOTE.into(),
        ..OutputRow::default()
    }
}

/// Streams output rows as CSV: header, sentinel, then data rows as given.
pub struct CsvEmitter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> CsvEmitter<W> {
    /// Start a document, writing the header and sentinel rows.
    pub fn new(inner: W) -> Result<Self, BeehiveError> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(inner);
        writer.write_record(COLUMNS)?;
        writer.write_record(sentinel_row().to_record())?;
        Ok(CsvEmitter { writer, rows: 0 })
    }

    pub fn write_row(&mut self, row: &OutputRow) -> Result<(), BeehiveError> {
        self.writer.write_record(row.to_record())?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and return the number of data rows written.
    pub fn finish(mut self) -> Result<usize, BeehiveError> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_sentinel() {
        let mut out = Vec::new();
        let count = CsvEmitter::new(&mut out).unwrap().finish().unwrap();
        assert_eq!(count, 0);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "volume,image_number,head,entry,topic,page,add,xref,see,index,item,unparsed,line,selection,full_image,annotation_uri"
        );
        assert_eq!(
            lines[1],
            "Volume 0,0,,,,,,,,,,Force Google Sheets to read CSV as UTF-8: büngt; if UTF-8 occurs too late, CSV will be read as ASCII,,,,"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_rows_written_in_order_and_quoted() {
        let mut out = Vec::new();
        let mut emitter = CsvEmitter::new(&mut out).unwrap();
        for n in ["0454", "0455"] {
            emitter
                .write_row(&OutputRow {
                    image_number: n.into(),
                    selection: "https://img/347,288,3070,287/full/0/default.jpg".into(),
                    ..OutputRow::default()
                })
                .unwrap();
        }
        assert_eq!(emitter.finish().unwrap(), 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with(",0454,"));
        assert!(lines[2].contains("\"https://img/347,288,3070,287/full/0/default.jpg\""));
        assert!(lines[3].starts_with(",0455,"));
    }
}
