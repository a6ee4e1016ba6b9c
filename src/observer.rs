//! Progress reporting for the retrying executor.

use log::{error, info, warn};
use std::time::Duration;

use crate::http::Method;

/// Receives progress from the executor. Purely observational: nothing an
/// observer does changes how a request is retried.
#[cfg_attr(test, mockall::automock)]
pub trait AttemptObserver: Send + Sync {
    fn on_attempt(&self, attempt: u32, max_attempts: u32, method: Method, url: &str);
    fn on_response(&self, attempt: u32, status: u16, body: &str);
    fn on_failure(&self, attempt: u32, reason: &str);
    fn on_wait(&self, attempt: u32, delay: Duration);
    fn on_exhausted(&self, max_attempts: u32, last_error: &str);
}

/// Forwards progress to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AttemptObserver for LogObserver {
    fn on_attempt(&self, attempt: u32, max_attempts: u32, method: Method, url: &str) {
        info!("Attempt {} of {}: {} {}", attempt, max_attempts, method, url);
    }

    fn on_response(&self, _attempt: u32, status: u16, body: &str) {
        info!("Response status: {}", status);
        info!("Response body: {}", body);
    }

    fn on_failure(&self, attempt: u32, reason: &str) {
        warn!("Attempt {} failed: {}", attempt, reason);
    }

    fn on_wait(&self, _attempt: u32, delay: Duration) {
        info!("Waiting {} seconds before retry...", delay.as_secs_f64());
    }

    fn on_exhausted(&self, max_attempts: u32, last_error: &str) {
        error!(
            "All {} attempts failed. Last error: {}",
            max_attempts, last_error
        );
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl AttemptObserver for NullObserver {
    fn on_attempt(&self, _: u32, _: u32, _: Method, _: &str) {}
    fn on_response(&self, _: u32, _: u16, _: &str) {}
    fn on_failure(&self, _: u32, _: &str) {}
    fn on_wait(&self, _: u32, _: Duration) {}
    fn on_exhausted(&self, _: u32, _: &str) {}
}
