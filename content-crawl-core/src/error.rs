//! Error types for model parsing, row import and crawler configuration.

use thiserror::Error;

/// Result alias used throughout the core crate.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors raised while building content models from external representations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A date column or key did not match any accepted pattern
    #[error("invalid date for '{field}': '{value}'")]
    DateParse {
        /// Column or key being parsed
        field: &'static str,
        /// Raw text that failed to parse
        value: String,
    },

    /// A numeric column could not be parsed
    #[error("invalid number for '{field}': '{value}'")]
    InvalidNumber {
        /// Column or key being parsed
        field: &'static str,
        /// Raw text that failed to parse
        value: String,
    },

    /// A spreadsheet row has fewer columns than its layout requires
    #[error("{kind} row has {actual} columns, expected at least {expected}")]
    RowTooShort {
        /// Row layout name (usually the content type value)
        kind: &'static str,
        /// Number of columns the layout reads
        expected: usize,
        /// Number of columns present
        actual: usize,
    },

    #[error("unknown content type '{0}'")]
    UnknownContentType(String),

    /// A row or object names a different content type than the one requested
    #[error("expected {expected} content, found {found}")]
    TypeMismatch {
        expected: crate::content_type::ContentType,
        found: crate::content_type::ContentType,
    },

    #[error("unknown content status '{0}'")]
    UnknownStatus(String),

    /// A crawler regex failed to compile
    #[error("invalid pattern '{expr}': {reason}")]
    InvalidPattern { expr: String, reason: String },

    /// Crawler configuration parsed but is structurally invalid
    #[error("invalid crawler config: {0}")]
    InvalidConfig(String),

    /// An export destination rejected a write
    #[error("failed to export {content_type} rows: {reason}")]
    Sink {
        content_type: crate::content_type::ContentType,
        reason: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(String),
}

impl ContentError {
    /// Creates an `InvalidPattern` error from a regex compile failure.
    #[must_use]
    pub fn pattern(expr: &str, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            expr: expr.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ContentError {
    fn from(e: serde_yaml::Error) -> Self {
        ContentError::Yaml(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_too_short_message_names_layout() {
        let err = ContentError::RowTooShort {
            kind: "video",
            expected: 16,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "video row has 3 columns, expected at least 16"
        );
    }

    #[test]
    fn test_pattern_error_keeps_expression() {
        let bad = regex::Regex::new("(unclosed").unwrap_err();
        let err = ContentError::pattern("(unclosed", &bad);
        assert!(err.to_string().contains("(unclosed"));
    }
}
