use crate::ledger::error::LedgerError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Log level for a failed poll. Polls retry on their next tick, so most
    /// failures are only worth a warning.
    pub fn classify_poll_error(&self, error: &LedgerError) -> LogLevel {
        match error {
            // Temporary server issues
            LedgerError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            LedgerError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Service answered but refused; shows up on every tick until fixed
            LedgerError::Rejected { .. } => LogLevel::Warn,

            // Malformed responses point at a version mismatch with the service
            LedgerError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    /// Log level for a failed vote or reset. The user acted and is waiting, so
    /// anything other than a service refusal is an error.
    pub fn classify_submit_error(&self, error: &LedgerError) -> LogLevel {
        match error {
            LedgerError::Rejected { .. } => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
