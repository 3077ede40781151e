use std::time::Duration;

use crate::error::{AlphaVantageError, Result};

pub mod optional;
pub mod overview;

pub use optional::{OptionalDate, OptionalNumber, TokenError, TokenKind, NONE_SENTINEL};
pub use overview::CompanyOverview;

/// Public Alpha Vantage query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

pub const API_KEY_VAR: &str = "AV_API_KEY";
pub const BASE_URL_VAR: &str = "AV_BASE_URL";
pub const TIMEOUT_VAR: &str = "AV_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    /// Applied to the transport handle. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Config for `api_key` against the public endpoint.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self::from_lookup(|name| std::env::var(name).ok())?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Alpha Vantage base URL: {}", config.base_url);
        if let Some(timeout) = config.timeout {
            tracing::debug!("Transport timeout: {}s", timeout.as_secs());
        }

        Ok(config)
    }

    /// Builds a config from any variable source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AlphaVantageError::Configuration(format!(
                    "{} environment variable required",
                    API_KEY_VAR
                ))
            })?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AlphaVantageError::Configuration(format!(
                "{} must start with http:// or https://",
                BASE_URL_VAR
            )));
        }

        let timeout = match lookup(TIMEOUT_VAR).filter(|s| !s.trim().is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AlphaVantageError::Configuration(format!(
                        "{} must be a whole number of seconds, got {:?}",
                        TIMEOUT_VAR, raw
                    ))
                })?;
                if secs == 0 {
                    return Err(AlphaVantageError::Configuration(format!(
                        "{} must be greater than zero",
                        TIMEOUT_VAR
                    )));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key,
            base_url,
            timeout,
        })
    }
}
