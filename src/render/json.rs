//! JSON rendering for metadata files and conversion reports.

use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value to JSON.
///
/// Pretty output ends with a newline so written files are line-terminated.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}
