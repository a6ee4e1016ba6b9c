//! Per-attempt classification and the final execution result.

use serde_json::Value;

use super::request::ResponseFormat;
use crate::error::ApiError;

/// Status and body of a response that made it back over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// What a single attempt amounted to. Only `Transient` is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        status: u16,
        body: String,
        data: Option<Value>,
    },
    ClientError {
        status: u16,
        body: String,
    },
    Transient {
        status: Option<u16>,
        reason: String,
    },
}

#[cfg(test)]
impl Outcome {
    fn is_transient(&self) -> bool {
        matches!(self, Outcome::Transient { .. })
    }
}

/// Classifies a response by status code and, for JSON requests, by whether the
/// body parses.
pub fn classify(response: RawResponse, format: ResponseFormat) -> Outcome {
    let RawResponse { status, body } = response;
    match status {
        200..=299 => match format {
            ResponseFormat::Text => Outcome::Success {
                status,
                body,
                data: None,
            },
            ResponseFormat::Json => match parse_body(&body) {
                Ok(data) => Outcome::Success {
                    status,
                    body,
                    data: Some(data),
                },
                Err(e) => Outcome::Transient {
                    status: Some(status),
                    reason: format!("Malformed response (HTTP {}): {}", status, e),
                },
            },
        },
        400..=499 => Outcome::ClientError { status, body },
        _ => Outcome::Transient {
            status: Some(status),
            reason: format!("HTTP {}: {}", status, body),
        },
    }
}

fn parse_body(body: &str) -> serde_json::Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(body)
}

/// The one value an executor hands back per operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub data: Option<Value>,
    pub error: Option<ApiError>,
    pub attempts: u32,
}

impl ExecutionResult {
    pub fn success(status: u16, body: String, data: Option<Value>, attempts: u32) -> Self {
        Self {
            success: true,
            status: Some(status),
            body: Some(body),
            data,
            error: None,
            attempts,
        }
    }

    pub fn client_error(status: u16, body: String, attempts: u32) -> Self {
        Self {
            success: false,
            status: Some(status),
            body: Some(body.clone()),
            data: None,
            error: Some(ApiError::Client { status, body }),
            attempts,
        }
    }

    pub fn exhausted(status: Option<u16>, reason: String, attempts: u32) -> Self {
        Self {
            success: false,
            status,
            body: None,
            data: None,
            error: Some(ApiError::Transient(reason)),
            attempts,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_classify_success_json() {
        let outcome = classify(raw(200, r#"{"id": 7}"#), ResponseFormat::Json);
        assert_eq!(
            outcome,
            Outcome::Success {
                status: 200,
                body: r#"{"id": 7}"#.to_string(),
                data: Some(json!({"id": 7})),
            }
        );
    }

    #[test]
    fn test_classify_success_empty_body_is_empty_object() {
        let outcome = classify(raw(204, ""), ResponseFormat::Json);
        match outcome {
            Outcome::Success { status, data, .. } => {
                assert_eq!(status, 204);
                assert_eq!(data, Some(json!({})));
            }
            other => panic!("Expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_malformed_json_is_transient() {
        let outcome = classify(raw(200, "<html>oops</html>"), ResponseFormat::Json);
        assert!(outcome.is_transient());
        match outcome {
            Outcome::Transient { status, reason } => {
                assert_eq!(status, Some(200));
                assert!(reason.contains("Malformed response"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_classify_text_passes_body_through() {
        let outcome = classify(raw(201, "not json"), ResponseFormat::Text);
        assert_eq!(
            outcome,
            Outcome::Success {
                status: 201,
                body: "not json".to_string(),
                data: None,
            }
        );
    }

    #[test]
    fn test_classify_client_error() {
        let outcome = classify(raw(404, "missing"), ResponseFormat::Json);
        assert_eq!(
            outcome,
            Outcome::ClientError {
                status: 404,
                body: "missing".to_string(),
            }
        );
        assert!(!outcome.is_transient());
    }

    #[test]
    fn test_classify_server_error_is_transient() {
        for status in [500, 502, 503, 599] {
            let outcome = classify(raw(status, "down"), ResponseFormat::Json);
            assert_eq!(
                outcome,
                Outcome::Transient {
                    status: Some(status),
                    reason: format!("HTTP {}: down", status),
                }
            );
        }
    }

    #[test]
    fn test_classify_unexpected_status_is_transient() {
        assert!(classify(raw(302, ""), ResponseFormat::Text).is_transient());
        assert!(classify(raw(101, ""), ResponseFormat::Text).is_transient());
    }

    #[test]
    fn test_execution_result_client_error_message() {
        let result = ExecutionResult::client_error(422, "bad region".to_string(), 1);
        assert!(!result.success);
        assert_eq!(result.status, Some(422));
        assert_eq!(result.error_message().as_deref(), Some("HTTP 422: bad region"));
    }
}
