//! Shared error type across qbridge crates.

use thiserror::Error;

/// Stable error categories (used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid options or config file.
    Config,
    /// Queue name filter did not compile.
    InvalidFilter,
    /// Queue locator could not be parsed.
    InvalidLocator,
    /// Upstream API call failed.
    Upstream,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::InvalidFilter => "INVALID_FILTER",
            ErrorKind::InvalidLocator => "INVALID_LOCATOR",
            ErrorKind::Upstream => "UPSTREAM",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, QBridgeError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum QBridgeError {
    #[error("config: {0}")]
    Config(String),
    #[error("invalid queue filter: {0}")]
    InvalidFilter(String),
    #[error("invalid queue locator: {0}")]
    InvalidLocator(String),
    #[error("upstream: {0}")]
    Upstream(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl QBridgeError {
    /// Map the error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QBridgeError::Config(_) => ErrorKind::Config,
            QBridgeError::InvalidFilter(_) => ErrorKind::InvalidFilter,
            QBridgeError::InvalidLocator(_) => ErrorKind::InvalidLocator,
            QBridgeError::Upstream(_) => ErrorKind::Upstream,
            QBridgeError::Internal(_) => ErrorKind::Internal,
        }
    }
}
