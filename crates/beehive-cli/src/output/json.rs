use beehive_core::error::BeehiveError;
use serde_json::Value;

pub fn print(value: &Value) -> Result<(), BeehiveError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
