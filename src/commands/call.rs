use anyhow::Result;
use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::ApiError,
    http::{
        ApiRequest, ExecutionResult, HttpTransport, ResponseFormat, RetryingRequestExecutor,
        Transport,
    },
    observer::{AttemptObserver, LogObserver},
    runtime::Runtime,
};

use super::config::CallOptions;

/// Printed on stdout when the call succeeds.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CallOutput {
    pub status: u16,
    pub content: String,
}

/// Send a single JSON payload to an arbitrary URL
#[tracing::instrument(skip(runtime, options), fields(url = %options.url))]
pub async fn call<R: Runtime>(runtime: R, options: CallOptions) -> Result<CallOutput> {
    let payload = parse_payload(&options.payload)?;
    let transport = HttpTransport::new(&options.config.client)?;
    let executor =
        RetryingRequestExecutor::new(transport, runtime, LogObserver, options.config.retry);

    let request = ApiRequest::new(options.method, options.url, payload)
        .with_timeout(options.config.timeout)
        .with_format(ResponseFormat::Text);

    info!("Executing API call to {}...", request.url());
    Ok(send(&executor, &request).await?)
}

/// Rejects anything that is not valid JSON before a request is built.
pub fn parse_payload(payload: &str) -> Result<Value, ApiError> {
    serde_json::from_str(payload)
        .map_err(|e| ApiError::validation(format!("Invalid JSON payload: {}", e)))
}

pub async fn send<T: Transport, R: Runtime, O: AttemptObserver>(
    executor: &RetryingRequestExecutor<T, R, O>,
    request: &ApiRequest,
) -> Result<CallOutput, ApiError> {
    into_output(executor.execute(request).await)
}

fn into_output(result: ExecutionResult) -> Result<CallOutput, ApiError> {
    match (result.success, result.status) {
        (true, Some(status)) => Ok(CallOutput {
            status,
            content: result.body.unwrap_or_default(),
        }),
        _ => Err(result
            .error
            .unwrap_or_else(|| ApiError::Transient("request failed".to_string()))),
    }
}
