//! Checker errors.

use thiserror::Error;

/// Errors that escape an invocation.
///
/// Transport failures of the availability query are absorbed and never
/// show up here.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A 2xx body without an integer-coercible `data.count`.
    #[error("Malformed availability response: {0}")]
    MalformedResponse(String),

    #[error("Invalid listing URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}
