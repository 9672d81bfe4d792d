//! Error handling for the ledger module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Failed to decode a JSON body from the service
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The service answered with a non-success status and no readable envelope.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The service answered `success: false`. `message` is meant for the user as-is.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl LedgerError {
    /// The reason reported by the service itself, if any.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            LedgerError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}
