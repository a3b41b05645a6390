//! Text-to-JSON conversion entry points.

use super::build::to_json;
use super::parse::{ParseOptions, decode_input, parse_with};
use crate::error::RfcResult;

/// Converts iCalendar text to its JSON document with default options.
///
/// ## Errors
/// Returns [`crate::error::RfcError::Parse`] if the text is not valid
/// iCalendar. No partial document is returned.
pub fn convert(raw: &str) -> RfcResult<serde_json::Value> {
    convert_with(raw, &ParseOptions::default())
}

/// Converts iCalendar text to its JSON document.
///
/// ## Errors
/// See [`convert`].
pub fn convert_with(raw: &str, options: &ParseOptions) -> RfcResult<serde_json::Value> {
    let roots = parse_with(raw, options)?;
    Ok(to_json(&roots))
}

/// Converts raw bytes, decoding them with [`decode_input`] first.
///
/// ## Errors
/// See [`convert`].
pub fn convert_bytes(raw: &[u8], options: &ParseOptions) -> RfcResult<serde_json::Value> {
    convert_with(&decode_input(raw), options)
}
