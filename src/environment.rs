use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The ledger service the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Service running next to a local development chain.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { ledger_url: String },
}

impl Environment {
    /// Returns the base URL of the ledger service.
    pub fn ledger_url(&self) -> String {
        match self {
            Environment::Local => "http://127.0.0.1:5000".to_string(),
            Environment::Custom { ledger_url } => ledger_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                ledger_url: trimmed.to_string(),
            });
        }
        Err(format!(
            "Invalid ledger URL: {}. Expected `local` or an http(s) URL.",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.ledger_url())
    }
}
