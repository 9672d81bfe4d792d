//! Application configuration.

use crate::consts::cli_consts::{network, polling, submission};
use crate::environment::Environment;
use crate::store::Feed;
use crate::workers::{PollSchedule, PollTask, SubmissionTimings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Polling interval for {0} must be greater than zero")]
    ZeroInterval(Feed),
    #[error("max_hold_ms ({max_hold_ms}) must be greater than the {timeout_ms} ms request timeout")]
    MaxHoldTooShort { max_hold_ms: u64, timeout_ms: u64 },
    #[error("{0}")]
    InvalidLedgerUrl(String),
}

/// Refresh interval of each feed, in milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PollingConfig {
    pub results_ms: u64,
    pub voting_status_ms: u64,
    pub voters_ms: u64,
    pub accounts_ms: u64,
    pub blockchain_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            results_ms: polling::RESULTS_INTERVAL_MS,
            voting_status_ms: polling::VOTING_STATUS_INTERVAL_MS,
            voters_ms: polling::VOTERS_INTERVAL_MS,
            accounts_ms: polling::ACCOUNTS_INTERVAL_MS,
            blockchain_ms: polling::BLOCKCHAIN_INTERVAL_MS,
        }
    }
}

impl PollingConfig {
    fn interval_ms(&self, feed: Feed) -> u64 {
        match feed {
            Feed::Accounts => self.accounts_ms,
            Feed::Tally => self.results_ms,
            Feed::Voters => self.voters_ms,
            Feed::ChainStatus => self.blockchain_ms,
            Feed::SessionStatus => self.voting_status_ms,
        }
    }
}

/// Delays around a vote or reset, in milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionConfig {
    pub resync_delay_ms: u64,
    pub release_delay_ms: u64,
    pub max_hold_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            resync_delay_ms: submission::RESYNC_DELAY_MS,
            release_delay_ms: submission::RELEASE_DELAY_MS,
            max_hold_ms: submission::MAX_HOLD_MS,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the ledger service. Falls back to the local service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_url: Option<String>,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl Config {
    /// Create Config pointing at the given ledger service.
    pub fn new(ledger_url: Option<String>) -> Self {
        Config {
            ledger_url,
            ..Default::default()
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Like [`Config::load_from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        match Self::load_from_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for task in PollSchedule::default().tasks() {
            if self.polling.interval_ms(task.feed) == 0 {
                return Err(ConfigError::ZeroInterval(task.feed));
            }
        }
        // The forced release must not fire while a request can still be running
        let timeout_ms = network::request_timeout().as_millis() as u64;
        if self.submission.max_hold_ms <= timeout_ms {
            return Err(ConfigError::MaxHoldTooShort {
                max_hold_ms: self.submission.max_hold_ms,
                timeout_ms,
            });
        }
        self.environment().map(|_| ())
    }

    /// The ledger service to talk to.
    pub fn environment(&self) -> Result<Environment, ConfigError> {
        match &self.ledger_url {
            Some(url) => url.parse().map_err(ConfigError::InvalidLedgerUrl),
            None => Ok(Environment::default()),
        }
    }

    pub fn poll_schedule(&self) -> PollSchedule {
        PollSchedule::new(
            PollSchedule::default()
                .tasks()
                .iter()
                .map(|task| {
                    PollTask::new(
                        task.feed,
                        Duration::from_millis(self.polling.interval_ms(task.feed)),
                    )
                })
                .collect(),
        )
    }

    pub fn submission_timings(&self) -> SubmissionTimings {
        SubmissionTimings {
            resync_delay: Duration::from_millis(self.submission.resync_delay_ms),
            release_delay: Duration::from_millis(self.submission.release_delay_ms),
            max_hold: Duration::from_millis(self.submission.max_hold_ms),
        }
    }
}

/// Location of the config file: `~/.votechain/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(".votechain").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::new(Some("https://vote.example.org".to_string()));
        config.polling.voters_ms = 7_000;
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::default();
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Saving a configuration should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config1 = Config::new(Some("http://10.0.0.1:5000".to_string()));
        config1.save(&path).unwrap();

        let config2 = Config::new(Some("http://10.0.0.2:5000".to_string()));
        config2.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config2, loaded_config);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // A missing file is not an error; every field takes its default.
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.environment(), Ok(Environment::Local));
    }

    #[test]
    // Fields left out of the file keep their defaults.
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"polling": {"blockchain_ms": 30000}}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.ledger_url, None);
        assert_eq!(config.polling.blockchain_ms, 30_000);
        assert_eq!(config.polling.results_ms, polling::RESULTS_INTERVAL_MS);
        assert_eq!(config.submission, SubmissionConfig::default());

        let schedule = config.poll_schedule();
        assert_eq!(
            schedule.interval_for(Feed::ChainStatus),
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            schedule.interval_for(Feed::Tally),
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_validate() {
        assert_eq!(Config::default().validate(), Ok(()));

        let mut config = Config::default();
        config.polling.voters_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval(Feed::Voters)));

        let mut config = Config::default();
        config.submission.max_hold_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxHoldTooShort { max_hold_ms: 0, .. })
        ));

        let config = Config::new(Some("ftp://ledger".to_string()));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLedgerUrl(_))
        ));
    }

    #[test]
    // A ceiling at or below the request timeout would free the lock mid-request.
    fn test_max_hold_must_outlast_request_timeout() {
        let timeout_ms = network::REQUEST_TIMEOUT_SECS * 1_000;
        for max_hold_ms in [500, timeout_ms] {
            let mut config = Config::default();
            config.submission.max_hold_ms = max_hold_ms;
            assert_eq!(
                config.validate(),
                Err(ConfigError::MaxHoldTooShort {
                    max_hold_ms,
                    timeout_ms
                })
            );
        }

        let mut config = Config::default();
        config.submission.max_hold_ms = timeout_ms + 1;
        assert_eq!(config.validate(), Ok(()));
        assert!(Config::default().submission_timings().max_hold > network::request_timeout());
    }

    #[test]
    fn test_default_timings_match_constants() {
        assert_eq!(
            Config::default().submission_timings(),
            SubmissionTimings::default()
        );
    }
}
