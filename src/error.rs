//! Error types for the unfiling library.

use std::io;
use thiserror::Error;

/// Result type alias for unfiling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing a filing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A semantic element was built without a structurally required part
    /// (empty composite, missing highlight style, title level 0).
    #[error("cannot construct semantic element: {reason}")]
    ElementConstruction { reason: String },

    /// A multi-pass step was invoked with an iteration index it does not
    /// recognize.
    #[error("invalid iteration: {iteration}")]
    InvalidIteration { iteration: usize },

    /// Error serializing elements or trees to JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a construction error with a formatted reason.
    pub(crate) fn construction(reason: impl Into<String>) -> Self {
        Error::ElementConstruction {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::construction("composite element has no children");
        assert_eq!(
            err.to_string(),
            "cannot construct semantic element: composite element has no children"
        );

        let err = Error::InvalidIteration { iteration: 2 };
        assert_eq!(err.to_string(), "invalid iteration: 2");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
