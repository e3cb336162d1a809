//! HTTP operation source.
//!
//! Issues a GET against a fixed URL and decodes the JSON body into an
//! `OperationRecord`. One `reqwest::Client` is reused across polls.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::OperationSource;
use crate::domain::OperationRecord;
use crate::error::{Result, ZephyrError};

/// Endpoint polled when no URL is configured
pub const DEFAULT_URL: &str = "http://api.zephyrportal.com/test.ashx";

/// Default request timeout
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration for the HTTP source
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl HttpSourceConfig {
    /// Create a config for a specific URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Fetches operation records over HTTP
pub struct HttpSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ZephyrError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl OperationSource for HttpSource {
    async fn fetch(&self) -> Result<OperationRecord> {
        let response = self.client.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZephyrError::Fetch(format!("{} returned HTTP {}", self.config.url, status)));
        }

        let body = response.text().await?;
        debug!("Fetched payload: {}", body);

        serde_json::from_str(&body).map_err(|e| ZephyrError::Decode(e.to_string()))
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpSourceConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_config_with_url() {
        let config = HttpSourceConfig::with_url("http://localhost:8080/op");
        assert_eq!(config.url, "http://localhost:8080/op");
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_source_describe_is_url() {
        let source = HttpSource::new(HttpSourceConfig::with_url("http://example.test/x")).unwrap();
        assert_eq!(source.describe(), "http://example.test/x");
        assert_eq!(source.url(), "http://example.test/x");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Port 9 on loopback (discard) is not expected to accept HTTP
        let config = HttpSourceConfig {
            url: "http://127.0.0.1:9/".to_string(),
            timeout: Duration::from_millis(500),
        };
        let source = HttpSource::new(config).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ZephyrError::Fetch(_)));
    }
}
