//! Error taxonomy for API operations.

use thiserror::Error;

/// Why an API operation did not succeed.
///
/// `Validation` and `Client` fail fast; `Transient` is only surfaced after the
/// retry budget is spent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Bad or missing input parameter. Raised before any network call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// HTTP 4xx response, surfaced verbatim.
    #[error("HTTP {status}: {body}")]
    Client { status: u16, body: String },

    /// Timeout, network failure, 5xx or malformed response after all attempts.
    #[error("{0}")]
    Transient(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::validation("Missing required field: operation");
        assert_eq!(
            err.to_string(),
            "Validation failed: Missing required field: operation"
        );

        let err = ApiError::Client {
            status: 404,
            body: "no such instance".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: no such instance");

        let err = ApiError::Transient("Request timeout".to_string());
        assert_eq!(err.to_string(), "Request timeout");
    }

    #[test]
    fn test_api_error_into_anyhow_downcasts() {
        let err = anyhow::Error::from(ApiError::validation("bad"));
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Validation(_))
        ));
    }
}
