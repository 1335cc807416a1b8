//! Persisted form of a [`SpanSet`].
//!
//! Spans are stored as a JSON array next to the note text:
//!
//! ```json
//! [{"start":0,"end":5,"bold":true,"italic":false,"underline":false,"color":"#FF0000"}]
//! ```
//!
//! `color` is omitted when absent. The reader also accepts the older
//! `isBold`/`isItalic`/`isUnderline` keys and ignores fields it does not know.

use super::SpanSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed style payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Encodes `spans` for storage.
pub fn serialize(spans: &SpanSet) -> String {
    match serde_json::to_string(spans) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode styles, storing none");
            String::new()
        }
    }
}

/// Decodes stored styles, reporting malformed input.
///
/// Blank input is an empty set, not an error.
pub fn try_deserialize(encoded: &str) -> Result<SpanSet, DecodeError> {
    if encoded.trim().is_empty() {
        return Ok(SpanSet::new());
    }
    Ok(serde_json::from_str(encoded)?)
}

/// Decodes stored styles, falling back to no styling if they are corrupt.
///
/// Styling is decoration over the note text, so a bad payload must never keep
/// the text from being shown.
pub fn deserialize(encoded: &str) -> SpanSet {
    try_deserialize(encoded).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding unreadable styles");
        SpanSet::new()
    })
}
