//! reqwest-backed transport carrying the API key and TLS settings.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use thiserror::Error;

use super::outcome::RawResponse;
use super::request::ApiRequest;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A request that never produced a status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timeout: {0}")]
    Timeout(String),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout(error.to_string())
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

/// Sends one request and returns whatever came back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub ignore_ssl: bool,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ignore_ssl: false,
            user_agent: format!("instapi/{}", env!("INSTAPI_VERSION")),
        }
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key_value = HeaderValue::from_str(&config.api_key)
            .context("API key contains characters not allowed in an HTTP header")?;
        key_value.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key_value);
        debug!("Using API key {}", mask_secret(&config.api_key));

        if config.ignore_ssl {
            debug!("TLS certificate verification disabled");
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .danger_accept_invalid_certs(config.ignore_ssl)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method(), url = request.url()))]
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .request(request.method().into(), request.url())
            .timeout(request.timeout())
            .json(request.body())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

/// Keeps the last four characters of a secret for log correlation.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 8 {
        return "*********".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("*********{}", tail)
}
