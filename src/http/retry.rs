//! Retry budget and backoff policies.

use std::time::Duration;

use crate::error::ApiError;

/// Default number of attempts per operation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff base in seconds.
pub const DEFAULT_BACKOFF_BASE_SECS: u64 = 5;

/// How the wait before the next attempt grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackoffPolicy {
    /// `base * attempt`
    Linear,
    /// `base * 2^(attempt - 1)`
    Exponential,
}

impl BackoffPolicy {
    /// Delay to wait after the given (1-based) failed attempt.
    pub fn delay(&self, base: Duration, attempt: u32) -> Duration {
        match self {
            BackoffPolicy::Linear => base.saturating_mul(attempt),
            BackoffPolicy::Exponential => {
                let factor = 2u32
                    .checked_pow(attempt.saturating_sub(1))
                    .unwrap_or(u32::MAX);
                base.saturating_mul(factor)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    max_attempts: u32,
    base_delay: Duration,
    policy: BackoffPolicy,
}

impl RetryConfig {
    /// Fails when `max_attempts` is zero; every operation gets at least one try.
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        policy: BackoffPolicy,
    ) -> Result<Self, ApiError> {
        if max_attempts == 0 {
            return Err(ApiError::validation("max attempts must be at least 1"));
        }
        Ok(Self {
            max_attempts,
            base_delay,
            policy,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn policy(&self) -> BackoffPolicy {
        self.policy
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        self.policy.delay(self.base_delay, attempt)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_secs(DEFAULT_BACKOFF_BASE_SECS),
            policy: BackoffPolicy::Exponential,
        }
    }
}
