//! HTTP request execution with retry logic and outcome classification.

mod client;
mod executor;
mod outcome;
mod request;
mod retry;

pub use client::{
    API_KEY_HEADER, ClientConfig, HttpTransport, Transport, TransportError, mask_secret,
};
pub use executor::RetryingRequestExecutor;
pub use outcome::{ExecutionResult, Outcome, RawResponse, classify};
pub use request::{ApiRequest, DEFAULT_TIMEOUT_SECS, Method, ResponseFormat};
pub use retry::{BackoffPolicy, DEFAULT_BACKOFF_BASE_SECS, DEFAULT_MAX_ATTEMPTS, RetryConfig};

#[cfg(test)]
pub use client::MockTransport;
