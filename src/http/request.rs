//! Immutable description of one API request.

use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Default per-attempt request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// How a 2xx response body is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Body must be JSON (or empty). Anything else is a malformed response.
    #[default]
    Json,
    /// Body is passed through verbatim.
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    url: String,
    body: Value,
    timeout: Duration,
    format: ResponseFormat,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            url: url.into(),
            body,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            format: ResponseFormat::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let req = ApiRequest::new(Method::Post, "http://localhost/x", json!({"a": 1}));
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.url(), "http://localhost/x");
        assert_eq!(req.body(), &json!({"a": 1}));
        assert_eq!(req.timeout(), Duration::from_secs(30));
        assert_eq!(req.format(), ResponseFormat::Json);
    }

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::new(Method::Put, "http://localhost/x", Value::Null)
            .with_timeout(Duration::from_secs(5))
            .with_format(ResponseFormat::Text);
        assert_eq!(req.timeout(), Duration::from_secs(5));
        assert_eq!(req.format(), ResponseFormat::Text);
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Post), reqwest::Method::POST);
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
