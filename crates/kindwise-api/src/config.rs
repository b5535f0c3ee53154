use std::env;
use std::time::Duration;

use crate::error::{KindwiseError, Result};

/// Default endpoint of the insect identification API
pub const DEFAULT_BASE_URL: &str = "https://insect.kindwise.com/api/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the default endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse configuration from environment variables
    ///
    /// `KINDWISE_API_KEY` is required; `KINDWISE_INSECT_BASE_URL` and
    /// `KINDWISE_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("KINDWISE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| KindwiseError::Config("KINDWISE_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = env::var("KINDWISE_INSECT_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        if let Ok(secs) = env::var("KINDWISE_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                KindwiseError::Config(format!("KINDWISE_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("secret");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "https://insect.kindwise.com/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ClientConfig::new("secret").with_base_url("http://localhost:8080/api/v1/");
        assert_eq!(config.base_url, "http://localhost:8080/api/v1");
    }
}
