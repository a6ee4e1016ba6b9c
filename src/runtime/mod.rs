//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the clock, sleeping and
//! the file system, so the executor and the handler can be tested without
//! waiting out real backoff delays or touching disk.
//!
//! # Structure
//!
//! - `fs` - File system operations (write, create directory)
//! - `time` - Wall clock and sleeping

mod fs;
mod time;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Time
    async fn sleep(&self, duration: Duration);
    fn now(&self) -> DateTime<Utc>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    async fn sleep(&self, duration: Duration) {
        self.sleep_impl(duration).await
    }

    fn now(&self) -> DateTime<Utc> {
        self.now_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }
}
