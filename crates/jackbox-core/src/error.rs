//! Shared error type across jackbox crates.

use thiserror::Error;

/// Stable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Room lookup 404, missing picture file.
    NotFound,
    /// JSON decode failure at any layer, handshake token mismatch.
    Malformed,
    /// Programmer error or unrecoverable connect failure.
    Fatal,
    /// Transport / network failure.
    Transient,
}

impl ErrorKind {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Malformed => "MALFORMED",
            ErrorKind::Fatal => "FATAL",
            ErrorKind::Transient => "TRANSIENT",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, JackboxError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum JackboxError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed: {0}")]
    Malformed(String),
    #[error("fatal: {0}")]
    Fatal(String),
    #[error("transient: {0}")]
    Transient(String),
}

impl JackboxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JackboxError::NotFound(_) => ErrorKind::NotFound,
            JackboxError::Malformed(_) => ErrorKind::Malformed,
            JackboxError::Fatal(_) => ErrorKind::Fatal,
            JackboxError::Transient(_) => ErrorKind::Transient,
        }
    }
}

impl From<serde_json::Error> for JackboxError {
    fn from(e: serde_json::Error) -> Self {
        JackboxError::Malformed(e.to_string())
    }
}
