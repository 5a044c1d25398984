//! Decoder error types.

/// A numeric sub-token inside one field was malformed.
///
/// Fatal for the whole decode: later stages may rely on earlier fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {field} token {token:?}: {reason}")]
pub struct FieldParseError {
    pub field: &'static str,
    pub token: String,
    pub reason: &'static str,
}

impl FieldParseError {
    pub(crate) fn new(field: &'static str, token: &str, reason: &'static str) -> Self {
        Self {
            field,
            token: token.to_string(),
            reason,
        }
    }
}

/// The report timestamp could not be parsed.
///
/// Never escapes the decoder: the affected time fields fall back to zero
/// and a warning is logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid report time {input:?}: {source}")]
pub struct TimeParseError {
    pub input: String,
    pub source: chrono::ParseError,
}
