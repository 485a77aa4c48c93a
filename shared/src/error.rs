//! Error types for the Notion calendar Lambda.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a request.
///
/// Per-record problems are not errors; see [`crate::aggregate::SkipReason`].
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notion answered with a non-success status
    #[error("Notion API error: {status} {body}")]
    Upstream { status: u16, body: String },

    /// Transport error talking to Notion
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get HTTP status code for this error.
    ///
    /// Every failure collapses into a generic server error for the caller.
    pub fn status_code(&self) -> u16 {
        500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_carries_status_and_body() {
        let err = Error::Upstream {
            status: 401,
            body: r#"{"code":"unauthorized"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Notion API error: 401 {"code":"unauthorized"}"#
        );
        assert_eq!(err.status_code(), 500);
    }
}
