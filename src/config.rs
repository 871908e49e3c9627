//! Runtime configuration read from `DONATION_HUB_*` environment variables.

use std::path::PathBuf;

use chrono::Duration;

use crate::adapters::auto_review::{DEFAULT_REVIEW_DELAY_SECS, MAX_REVIEW_DELAY_SECS};
use crate::adapters::sanitize::DEFAULT_SANITIZE_MAX_BYTES;

pub const ENV_DB_PATH: &str = "DONATION_HUB_DB_PATH";
pub const ENV_REVIEW_DELAY: &str = "DONATION_HUB_KYC_REVIEW_DELAY_SECS";
pub const ENV_LOG_MODE: &str = "DONATION_HUB_LOG_MODE";
pub const ENV_LOG_FILE: &str = "DONATION_HUB_LOG_FILE";
pub const ENV_SANITIZE_MAX_BYTES: &str = "DONATION_HUB_SANITIZE_MAX_BYTES";

/// Database path that selects the in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogMode {
    /// File when stderr is a terminal, stderr otherwise.
    #[default]
    Auto,
    File,
    Stderr,
}

impl std::str::FromStr for LogMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stderr" => Ok(Self::Stderr),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub kyc_review_delay: Duration,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub sanitize_max_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "donation_hub.db".to_string(),
            kyc_review_delay: Duration::seconds(DEFAULT_REVIEW_DELAY_SECS),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("donation_hub.log"),
            sanitize_max_bytes: DEFAULT_SANITIZE_MAX_BYTES,
        }
    }
}

impl AppConfig {
    /// # Errors
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or empty keys keep defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_DB_PATH) {
            config.db_path = path;
        }

        if let Some(raw) = get(ENV_REVIEW_DELAY) {
            config.kyc_review_delay = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| (0..=MAX_REVIEW_DELAY_SECS).contains(secs))
                .and_then(Duration::try_seconds)
                .ok_or(ConfigError::Invalid {
                    var: ENV_REVIEW_DELAY,
                    value: raw.clone(),
                    reason: "expected 0 to 2592000 seconds",
                })?;
        }

        if let Some(raw) = get(ENV_LOG_MODE) {
            config.log_mode = raw.parse().map_err(|()| ConfigError::Invalid {
                var: ENV_LOG_MODE,
                value: raw.clone(),
                reason: "expected auto, file or stderr",
            })?;
        }

        if let Some(path) = get(ENV_LOG_FILE) {
            config.log_file = PathBuf::from(path);
        }

        if let Some(raw) = get(ENV_SANITIZE_MAX_BYTES) {
            config.sanitize_max_bytes = raw
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    var: ENV_SANITIZE_MAX_BYTES,
                    value: raw.clone(),
                    reason: "expected a positive byte count",
                })?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn uses_in_memory_db(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }
}
