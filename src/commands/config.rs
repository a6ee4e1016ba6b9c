use std::path::PathBuf;
use std::time::Duration;

use crate::error::ApiError;
use crate::http::{BackoffPolicy, ClientConfig, Method, RetryConfig};
use crate::params::RawParams;

/// Default base URL of the instance controller.
pub const DEFAULT_BASE_URL: &str = "http://client-setup-platform.beta-dbx.commerceiq.ai";

/// Connection and retry settings shared by both commands.
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Config {
    pub fn new(
        api_key: Option<String>,
        ignore_ssl: bool,
        timeout_secs: u64,
        max_attempts: u32,
        backoff_base_secs: u64,
        backoff: BackoffPolicy,
    ) -> Result<Self, ApiError> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ApiError::validation("API key is not set (X_API_KEY / --api-key)"))?;
        let retry = RetryConfig::new(
            max_attempts,
            Duration::from_secs(backoff_base_secs),
            backoff,
        )?;

        let mut client = ClientConfig::new(api_key);
        client.ignore_ssl = ignore_ssl;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
            retry,
        })
    }
}

/// Inputs of `instapi call`.
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub url: String,
    pub payload: String,
    pub method: Method,
    pub config: Config,
}

/// Inputs of `instapi run`.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub params: RawParams,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub config: Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new(
            Some("key".to_string()),
            true,
            10,
            2,
            5,
            BackoffPolicy::Linear,
        )
        .unwrap();

        assert_eq!(config.client.api_key, "key");
        assert!(config.client.ignore_ssl);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts(), 2);
        assert_eq!(config.retry.delay(2), Duration::from_secs(10));
    }

    #[test]
    fn test_config_requires_api_key() {
        for key in [None, Some(String::new())] {
            let err = Config::new(key, false, 30, 3, 5, BackoffPolicy::Exponential).unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
    }

    #[test]
    fn test_config_rejects_zero_attempts() {
        let err = Config::new(
            Some("key".to_string()),
            false,
            30,
            0,
            5,
            BackoffPolicy::Exponential,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
