//! Connection settings: base URL, optional API key, optional timeout.

use std::time::Duration;

use thiserror::Error;

pub const API_URL_VAR: &str = "CASELAW_API_URL";
pub const API_KEY_VAR: &str = "CASELAW_API_KEY";
pub const TIMEOUT_VAR: &str = "CASELAW_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CASELAW_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("API key contains characters not allowed in a header")]
    InvalidApiKey,
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Where the client runs. Only affects the fallback base URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    Desktop,
    /// Android emulator: the host machine is reachable at 10.0.2.2.
    AndroidEmulator,
}

impl Target {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Target::Desktop => "http://localhost:8000/api",
            Target::AndroidEmulator => "http://10.0.2.2:8000/api",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as `X-API-Key` on every request when set.
    pub api_key: Option<String>,
    /// No timeout unless configured.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: None,
        }
    }

    /// Read `CASELAW_API_URL`, `CASELAW_API_KEY` and `CASELAW_TIMEOUT_SECS`,
    /// falling back to the target's localhost address.
    pub fn from_env(target: Target) -> Result<Self, ConfigError> {
        Self::from_lookup(target, |key| std::env::var(key).ok())
    }

    fn from_lookup(
        target: Target,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = non_empty(API_URL_VAR).unwrap_or_else(|| target.default_base_url().into());
        let api_key = non_empty(API_KEY_VAR);
        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))
}
