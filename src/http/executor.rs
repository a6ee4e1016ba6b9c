//! Bounded retry loop around a single API request.

use log::debug;

use super::client::Transport;
use super::outcome::{ExecutionResult, Outcome, classify};
use super::request::ApiRequest;
use super::retry::RetryConfig;
use crate::observer::AttemptObserver;
use crate::runtime::Runtime;

/// Sends a request until it succeeds, hits a client error, or runs out of
/// attempts. Always ends in an [`ExecutionResult`].
pub struct RetryingRequestExecutor<T: Transport, R: Runtime, O: AttemptObserver> {
    transport: T,
    runtime: R,
    observer: O,
    retry: RetryConfig,
}

impl<T: Transport, R: Runtime, O: AttemptObserver> RetryingRequestExecutor<T, R, O> {
    pub fn new(transport: T, runtime: R, observer: O, retry: RetryConfig) -> Self {
        Self {
            transport,
            runtime,
            observer,
            retry,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    #[tracing::instrument(skip(self, request), fields(method = %request.method(), url = request.url()))]
    pub async fn execute(&self, request: &ApiRequest) -> ExecutionResult {
        let max_attempts = self.retry.max_attempts();
        let mut last_status = None;
        let mut last_error = String::new();
        debug!(
            "Up to {} attempts, {:?} backoff",
            max_attempts,
            self.retry.policy()
        );

        for attempt in 1..=max_attempts {
            self.observer
                .on_attempt(attempt, max_attempts, request.method(), request.url());

            let outcome = match self.transport.send(request).await {
                Ok(response) => {
                    self.observer
                        .on_response(attempt, response.status, &response.body);
                    classify(response, request.format())
                }
                Err(e) => Outcome::Transient {
                    status: None,
                    reason: e.to_string(),
                },
            };

            match outcome {
                Outcome::Success { status, body, data } => {
                    debug!("Succeeded on attempt {} with HTTP {}", attempt, status);
                    return ExecutionResult::success(status, body, data, attempt);
                }
                Outcome::ClientError { status, body } => {
                    let result = ExecutionResult::client_error(status, body, attempt);
                    if let Some(message) = result.error_message() {
                        self.observer.on_failure(attempt, &message);
                    }
                    return result;
                }
                Outcome::Transient { status, reason } => {
                    self.observer.on_failure(attempt, &reason);
                    last_status = status;
                    last_error = reason;
                }
            }

            if attempt < max_attempts {
                let delay = self.retry.delay(attempt);
                self.observer.on_wait(attempt, delay);
                self.runtime.sleep(delay).await;
            }
        }

        self.observer.on_exhausted(max_attempts, &last_error);
        ExecutionResult::exhausted(last_status, last_error, max_attempts)
    }
}
