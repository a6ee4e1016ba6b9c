//! Entry points behind the CLI subcommands.

mod call;
pub mod config;
mod run;

pub use call::{CallOutput, call, parse_payload, send};
pub use config::{CallOptions, Config, DEFAULT_BASE_URL, RunOptions};
pub use run::{execute_operation, run};
