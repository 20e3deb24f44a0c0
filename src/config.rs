//! Runtime configuration read from environment variables.
//!
//! Configuration is resolved once, up front, and handed to the adapters
//! that need it. Nothing reads the environment lazily.

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable selecting the provider model.
pub const MODEL_VAR: &str = "GEMINI_MODEL";
/// Environment variable overriding the provider API base URL.
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";
/// Environment variable setting the provider request timeout in seconds.
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";
/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable setting the connection pool size.
pub const POOL_SIZE_VAR: &str = "DATABASE_POOL_SIZE";

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POOL_SIZE: u32 = 20;

/// Errors raised while resolving configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Settings for the text-generation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl ProviderConfig {
    /// Creates provider settings with default model, base URL, and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    pool_size: u32,
}

impl DatabaseConfig {
    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    provider: ProviderConfig,
    database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let mut provider = ProviderConfig::new(api_key);
        if let Some(model) = read(MODEL_VAR) {
            provider = provider.with_model(model);
        }
        if let Some(api_base) = read(API_BASE_VAR) {
            provider = provider.with_api_base(api_base);
        }
        if let Some(raw_timeout) = read(TIMEOUT_VAR) {
            let seconds = parse_positive(TIMEOUT_VAR, &raw_timeout)?;
            provider = provider.with_timeout(Duration::from_secs(seconds));
        }

        let database = read(DATABASE_URL_VAR)
            .map(|url| {
                let pool_size = read(POOL_SIZE_VAR)
                    .map_or(Ok(DEFAULT_POOL_SIZE), parse_pool_size)?;
                Ok(DatabaseConfig { url, pool_size })
            })
            .transpose()?;

        Ok(Self { provider, database })
    }

    /// Returns the provider settings.
    #[must_use]
    pub const fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Returns the database settings, if a database URL was configured.
    #[must_use]
    pub const fn database(&self) -> Option<&DatabaseConfig> {
        self.database.as_ref()
    }

    /// Returns the database settings or fails when none were configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming [`DATABASE_URL_VAR`].
    pub fn require_database(&self) -> Result<&DatabaseConfig, ConfigError> {
        self.database
            .as_ref()
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))
    }
}

fn parse_pool_size(raw: String) -> Result<u32, ConfigError> {
    let size = parse_positive(POOL_SIZE_VAR, &raw)?;
    u32::try_from(size).map_err(|_| ConfigError::Invalid {
        name: POOL_SIZE_VAR,
        value: raw,
        reason: "pool size is too large",
    })
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            value: raw.to_owned(),
            reason: "must be greater than zero",
        }),
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::Invalid {
            name,
            value: raw.to_owned(),
            reason: "expected a positive integer",
        }),
    }
}
