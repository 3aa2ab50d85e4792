//! JSON rendering for segmentation results.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::parser::Segmentation;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a segmentation result to JSON.
pub fn to_json(seg: &Segmentation, format: JsonFormat) -> Result<String> {
    serialize(seg, format)
}

/// Serialize any renderable value with the chosen layout.
pub(crate) fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
