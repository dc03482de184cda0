use std::env;
use std::time::Duration;

use tracing::debug;

use crate::error::ConfigError;

/// Public MCQ generator endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://mcqs-generator.vercel.app/generate";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENDPOINT_VAR: &str = "MCQ_GENERATOR_URL";
pub const TIMEOUT_VAR: &str = "MCQ_GENERATOR_TIMEOUT_SECS";

/// Look up a setting from the environment, falling back to a `.env` file.
pub fn find_var(name: &str) -> Option<String> {
    // Silently ignore a missing .env
    let _ = dotenvy::dotenv();
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Settings for reaching the question generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a config from `MCQ_GENERATOR_URL` and `MCQ_GENERATOR_TIMEOUT_SECS`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(endpoint) = find_var(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        if let Some(raw) = find_var(TIMEOUT_VAR) {
            config.timeout = parse_timeout_secs(&raw)?;
        }
        debug!(endpoint = %config.endpoint, timeout = ?config.timeout, "Loaded generator config");
        Ok(config)
    }
}

/// Parse a whole number of seconds; zero is rejected.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            name: TIMEOUT_VAR,
            value: raw.to_string(),
        }),
    }
}
