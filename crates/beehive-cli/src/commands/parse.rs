use beehive_core::error::BeehiveError;
use beehive_core::parsing::classify::detect_layout;
use beehive_core::parsing::parse_record;
use std::io::Read;

use crate::output;

pub fn run(text: Option<String>, output_format: &str) -> Result<(), BeehiveError> {
    let content = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let record = parse_record(&content);
    let layout = detect_layout(&record.line);

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "layout": layout,
            "line": record.line,
            "fields": record.fields,
        }))?,
        _ => output::table::print_record(&record, layout),
    }

    Ok(())
}
