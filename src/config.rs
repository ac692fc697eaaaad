//! Runtime configuration for the board.
//!
//! Defaults suit a local development backend. Every value can be overridden
//! from the environment through [`BoardConfig::from_env`].

use std::time::Duration;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::board::{
    adapters::{FileManualTaskStore, HttpServiceRequestGateway},
    ports::{GatewayResult, ManualStoreResult},
    services::ServerMovePolicy,
};

/// Environment variable overriding the service-request API base URL.
pub const API_URL_ENV: &str = "RECOVERY_BOARD_API_URL";
/// Environment variable overriding the manual task store directory.
pub const STORE_DIR_ENV: &str = "RECOVERY_BOARD_STORE_DIR";
/// Environment variable overriding the manual task store key.
pub const STORE_KEY_ENV: &str = "RECOVERY_BOARD_STORE_KEY";
/// Environment variable overriding the HTTP timeout, in whole seconds.
pub const TIMEOUT_SECS_ENV: &str = "RECOVERY_BOARD_TIMEOUT_SECS";
/// Environment variable selecting the server move policy.
pub const MOVE_POLICY_ENV: &str = "RECOVERY_BOARD_MOVE_POLICY";
/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "RECOVERY_BOARD_LOG";

const DEFAULT_API_URL: &str = "http://localhost:8001";
const DEFAULT_STORE_DIR: &str = ".recovery-board";
const DEFAULT_STORE_KEY: &str = "kanban_manual_tasks";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to an empty value.
    #[error("{name} must not be empty")]
    Empty {
        /// Variable name.
        name: &'static str,
    },

    /// The timeout was not a positive whole number of seconds.
    #[error("RECOVERY_BOARD_TIMEOUT_SECS must be a positive number of seconds, got {value:?}")]
    InvalidTimeout {
        /// Rejected value.
        value: String,
    },

    /// The move policy was not recognised.
    #[error("RECOVERY_BOARD_MOVE_POLICY must be `optimistic` or `pessimistic`, got {value:?}")]
    InvalidMovePolicy {
        /// Rejected value.
        value: String,
    },
}

/// Settings needed to wire the board to its backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    api_base_url: String,
    store_dir: Utf8PathBuf,
    store_key: String,
    request_timeout: Duration,
    move_policy: ServerMovePolicy,
    log_filter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            store_dir: Utf8PathBuf::from(DEFAULT_STORE_DIR),
            store_key: DEFAULT_STORE_KEY.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            move_policy: ServerMovePolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl BoardConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, starting from the defaults.
    ///
    /// Unset variables keep their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = non_empty(&lookup, API_URL_ENV)? {
            config.api_base_url = url;
        }
        if let Some(dir) = non_empty(&lookup, STORE_DIR_ENV)? {
            config.store_dir = Utf8PathBuf::from(dir);
        }
        if let Some(key) = non_empty(&lookup, STORE_KEY_ENV)? {
            config.store_key = key;
        }
        if let Some(raw) = lookup(TIMEOUT_SECS_ENV) {
            config.request_timeout = parse_timeout(&raw)?;
        }
        if let Some(raw) = lookup(MOVE_POLICY_ENV) {
            config.move_policy = ServerMovePolicy::try_from(raw.as_str())
                .map_err(|value| ConfigError::InvalidMovePolicy { value })?;
        }
        if let Some(filter) = non_empty(&lookup, LOG_ENV)? {
            config.log_filter = filter;
        }
        Ok(config)
    }

    /// Sets the service-request API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Sets the manual task store directory.
    #[must_use]
    pub fn with_store_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.store_dir = dir.into();
        self
    }

    /// Sets the manual task store key.
    #[must_use]
    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the server move policy.
    #[must_use]
    pub const fn with_move_policy(mut self, policy: ServerMovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Returns the service-request API base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the manual task store directory.
    #[must_use]
    pub const fn store_dir(&self) -> &Utf8PathBuf {
        &self.store_dir
    }

    /// Returns the manual task store key.
    #[must_use]
    pub fn store_key(&self) -> &str {
        &self.store_key
    }

    /// Returns the HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the server move policy.
    #[must_use]
    pub const fn move_policy(&self) -> ServerMovePolicy {
        self.move_policy
    }

    /// Returns the log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Builds the HTTP gateway for the configured API.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the HTTP client cannot be built.
    pub fn http_gateway(&self) -> GatewayResult<HttpServiceRequestGateway> {
        HttpServiceRequestGateway::new(self.api_base_url.as_str(), self.request_timeout)
    }

    /// Opens the file-backed manual task store.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the directory cannot be opened or
    /// created.
    pub fn file_store(&self) -> ManualStoreResult<FileManualTaskStore> {
        FileManualTaskStore::open(&self.store_dir, self.store_key.as_str())
    }
}

fn non_empty<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        Some(value) => Ok(Some(value.trim().to_owned())),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|seconds| *seconds > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            value: raw.to_owned(),
        })
}
