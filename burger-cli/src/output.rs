use anyhow::Result;
use serde_json::Value;

use crate::cli::OutputFormat;

pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::JsonCompact => serde_json::to_string(value)?,
    };
    Ok(rendered)
}

/// Error shape printed on stdout, so scripts can parse failures too.
pub fn error_json(message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "message": message,
    })
}
