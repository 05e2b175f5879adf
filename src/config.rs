//! Environment-backed runtime configuration.
//!
//! Values come from the process environment after an optional `.env` file
//! has been loaded. Parsing goes through an injectable lookup so callers and
//! tests can supply their own source.

use std::num::NonZeroU32;
use thiserror::Error;

/// Connection string of the `PostgreSQL` store. Absent selects memory.
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Maximum number of pooled database connections.
pub const POOL_SIZE: &str = "SPRINTDESK_DB_POOL_SIZE";
/// `tracing` filter directive.
pub const LOG_FILTER: &str = "SPRINTDESK_LOG";
/// Number of records listed by the report commands.
pub const RECENT_LIMIT: &str = "SPRINTDESK_RECENT_LIMIT";

const DEFAULT_POOL_SIZE: NonZeroU32 = match NonZeroU32::new(8) {
    Some(size) => size,
    None => NonZeroU32::MIN,
};
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_RECENT_LIMIT: usize = 5;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting could not be parsed.
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber {
        /// Environment key.
        key: &'static str,
        /// Raw value found.
        value: String,
    },

    /// The `.env` file exists but could not be read.
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

/// Runtime settings of the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection string, if a database is configured.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: NonZeroU32,
    /// Filter directive for the log subscriber.
    pub log_filter: String,
    /// How many records the report commands list.
    pub recent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DotEnv`] for an unreadable `.env` file or
    /// [`ConfigError::InvalidNumber`] for a malformed numeric setting.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            return Err(err.into());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, applying defaults for absent keys.
    ///
    /// Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric setting is not
    /// a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Ok(Self {
            database_url: read(DATABASE_URL),
            pool_size: read(POOL_SIZE)
                .map(|raw| parse_positive(POOL_SIZE, raw))
                .transpose()?
                .unwrap_or(defaults.pool_size),
            log_filter: read(LOG_FILTER).unwrap_or(defaults.log_filter),
            recent_limit: read(RECENT_LIMIT)
                .map(|raw| parse_positive(RECENT_LIMIT, raw))
                .transpose()?
                .map_or(defaults.recent_limit, |limit| {
                    usize::try_from(limit.get()).unwrap_or(usize::MAX)
                }),
        })
    }
}

fn parse_positive(key: &'static str, raw: String) -> Result<NonZeroU32, ConfigError> {
    raw.parse::<NonZeroU32>()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
}
