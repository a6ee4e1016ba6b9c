pub mod commands;
pub mod error;
pub mod http;
pub mod logging;
pub mod observer;
pub mod operation;
pub mod params;
pub mod payload;
pub mod report;
pub mod runtime;

/// Version derived from `git describe` at build time.
pub const VERSION: &str = env!("INSTAPI_VERSION");
