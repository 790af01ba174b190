//! Parse-boundary error types.
//!
//! The analytics layer itself is total and never fails: degenerate input
//! yields documented zero sentinels. Errors exist only at the ingestion
//! boundary, where external string data is parsed into engine enums.

use thiserror::Error;

/// Errors raised while parsing external trade data into engine types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Unrecognized trade side string.
    #[error("unknown trade side '{0}', expected 'long' or 'short'")]
    UnknownSide(String),

    /// Unrecognized order type string.
    #[error("unknown order type '{0}', expected 'market', 'limit', or 'other'")]
    UnknownOrderType(String),

    /// Unrecognized summary status string.
    #[error("unknown summary status '{0}', expected 'ready', 'processing', or 'error'")]
    UnknownStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_value() {
        let err = ParseError::UnknownSide("sideways".to_string());
        assert!(err.to_string().contains("sideways"));

        let err = ParseError::UnknownOrderType("stop".to_string());
        assert!(err.to_string().contains("stop"));

        let err = ParseError::UnknownStatus("pending".to_string());
        assert!(err.to_string().contains("pending"));
    }
}
