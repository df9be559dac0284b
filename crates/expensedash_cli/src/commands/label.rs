//! Label command implementation.

use super::OutputFormat;
use expensedash_model::{format_bucket_label, LabelMode, Period};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LabelResult<'a> {
    key: &'a str,
    period: Period,
    label: String,
}

/// Runs the label command.
pub fn run(
    key: &str,
    period: Period,
    mode: LabelMode,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let label = format_bucket_label(key, period, mode);
    match format {
        OutputFormat::Text => println!("{label}"),
        OutputFormat::Json => {
            let result = LabelResult { key, period, label };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
