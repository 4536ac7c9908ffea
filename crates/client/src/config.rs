//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FITROOM_API_URL` - Base URL of the try-on service
//!   (default: `http://localhost:8000`)
//! - `FITROOM_HTTP_TIMEOUT_SECS` - Per-request HTTP timeout in seconds
//!   (default: none; the orchestration core imposes no timeouts and a
//!   hung request simply stays pending until invalidated)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Fitroom client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the try-on service.
    pub base_url: Url,
    /// Optional per-request timeout applied at the HTTP layer.
    pub http_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration pointing at a service base URL, with no
    /// request timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http_timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            std::env::var("FITROOM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("FITROOM_API_URL".to_string(), e.to_string()))?;

        let http_timeout = match std::env::var("FITROOM_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "FITROOM_HTTP_TIMEOUT_SECS".to_string(),
                        format!("not a number: {raw}"),
                    )
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_timeout() {
        let config = ClientConfig::new(Url::parse("http://localhost:8000").expect("valid url"));
        assert!(config.http_timeout.is_none());
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_default_url_parses() {
        assert!(Url::parse(DEFAULT_API_URL).is_ok());
    }
}
