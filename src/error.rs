//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport failure (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failure (401/403), usually an expired or missing token
    #[error("Not authorized: {0}")]
    Auth(String),

    /// Validation failure (400 with a server message)
    #[error("{0}")]
    Validation(String),

    /// Record not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict or server-side limit (e.g. "levels limit reached")
    #[error("{0}")]
    Conflict(String),

    /// Any other non-success API response
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session storage error
    #[error("Session error: {0}")]
    Session(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a parse error with message
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a session error with message
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// True when the failure means the stored token is no longer accepted.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::Validation("levels limit reached".to_string());
        assert_eq!(err.to_string(), "levels limit reached");
    }

    #[test]
    fn test_auth_detection() {
        assert!(AppError::Auth("token expired".to_string()).is_auth());
        assert!(!AppError::NotFound("course".to_string()).is_auth());
    }
}
