//! Reasons a remote key fetch is abandoned.

use hashkey::KeyGenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, protocol or body decoding failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured endpoint cannot carry the API paths.
    #[error("Invalid endpoint {0}")]
    Endpoint(String),

    #[error("Request timed out")]
    Timeout,

    /// Server answered with a non-success status.
    #[error("Server returned status {0}")]
    Status(u16),

    /// Server answered `success: false` or left out the key set.
    #[error("Server rejected request: {0}")]
    Rejected(String),

    /// Key set does not follow the key grammar.
    #[error("Malformed key set: {0}")]
    Malformed(#[from] KeyGenError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
