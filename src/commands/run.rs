use anyhow::{Context, Result};
use log::info;
use std::time::{Duration, Instant};

use crate::{
    error::ApiError,
    http::{ApiRequest, ExecutionResult, HttpTransport, RetryingRequestExecutor, Transport},
    observer::{AttemptObserver, LogObserver},
    params::InstanceParams,
    payload::build_payload,
    report::{ResultRecord, save_result, summary},
    runtime::Runtime,
};

use super::config::RunOptions;

/// Run one lifecycle operation described by the CI parameters
#[tracing::instrument(skip(runtime, options))]
pub async fn run<R: Runtime>(runtime: R, options: RunOptions) -> Result<()> {
    info!("Parameters: {:?}", options.params);
    info!("Validating parameters...");
    let params = options.params.validate()?;
    info!("Parameters validated successfully");

    let transport = HttpTransport::new(&options.config.client)?;
    let executor =
        RetryingRequestExecutor::new(transport, runtime, LogObserver, options.config.retry);

    info!("Executing operation {}...", params.operation);
    let started = Instant::now();
    let result = execute_operation(
        &executor,
        &params,
        &options.base_url,
        options.config.timeout,
    )
    .await;
    let duration = started.elapsed();

    print!(
        "{}",
        summary(
            &result,
            &params.instance_name,
            params.operation.name(),
            duration
        )
    );

    let path = save_result(
        executor.runtime(),
        &options.output_dir,
        params.build_number.as_deref(),
        &ResultRecord::from(&result),
    )
    .context("Failed to save result file")?;
    info!("Results saved to {}", path.display());

    match result.error {
        None if result.success => Ok(()),
        Some(e) => Err(e.into()),
        None => Err(ApiError::Transient("operation failed".to_string()).into()),
    }
}

/// Builds the request for `params.operation` and executes it.
pub async fn execute_operation<T: Transport, R: Runtime, O: AttemptObserver>(
    executor: &RetryingRequestExecutor<T, R, O>,
    params: &InstanceParams,
    base_url: &str,
    timeout: Duration,
) -> ExecutionResult {
    let operation = params.operation;
    let payload = build_payload(params, executor.runtime().now());
    info!(
        "Payload: {}",
        serde_json::to_string_pretty(&payload).unwrap_or_default()
    );

    let request =
        ApiRequest::new(operation.method(), operation.url(base_url), payload).with_timeout(timeout);
    executor.execute(&request).await
}
