//! Error types for loading and addressing native datasets.
//!
//! Only transport and parse failures of a dataset load are hard errors.
//! Malformed entries are absorbed by the normalizer and an unknown key is a
//! regular [`Selection`](crate::state::Selection), so neither appears here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NatrefError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport failure (DNS, TLS, connection reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("{location} answered with status {status}")]
    Status { location: String, status: u16 },

    /// Every candidate location of a dataset failed.
    #[error("dataset '{dataset}' could not be loaded ({})", .attempts.join("; "))]
    AllCandidatesFailed {
        dataset: String,
        attempts: Vec<String>,
    },

    /// A permalink or base address that is not a valid URL.
    #[error("invalid address '{0}'")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, NatrefError>;
