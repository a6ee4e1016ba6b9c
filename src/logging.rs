//! env_logger setup, optionally teeing every record into a per-run log file.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const DEFAULT_FILTER: &str = "info";

/// Initializes the global logger. Records go to stderr, and also to
/// `log_file` when one is given.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee {
            file,
            stderr: io::stderr(),
        })));
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}

/// `api_handler_YYYYMMDD_HHMMSS.log` under `dir`.
pub fn log_file_path(dir: &Path, started: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "api_handler_{}.log",
        started.format("%Y%m%d_%H%M%S")
    ))
}

struct Tee {
    file: File,
    stderr: io::Stderr,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        self.stderr.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.stderr.flush()
    }
}
