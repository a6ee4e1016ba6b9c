//! Console banner, result box, and the persisted result record.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::ExecutionResult;
use crate::runtime::Runtime;

/// Inner width of the boxes, between the two border characters.
const BOX_WIDTH: usize = 63;

pub fn banner(version: &str) -> String {
    let mut out = border('╔', '╗');
    out.push_str(&line(&pad("  CLIENT SETUP PLATFORM API HANDLER")));
    out.push_str(&line(&pad(&format!("  Version {}", version))));
    out.push_str(&border('╚', '╝'));
    out
}

/// Result box followed by the response data or the error.
pub fn summary(
    result: &ExecutionResult,
    instance_name: &str,
    operation: &str,
    duration: Duration,
) -> String {
    let headline = if result.success {
        "OPERATION COMPLETED SUCCESSFULLY"
    } else {
        "OPERATION FAILED"
    };
    let status = result
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let duration = format!("{:.2} seconds", duration.as_secs_f64());

    let mut out = border('╔', '╗');
    out.push_str(&line(&format!("{:^width$}", headline, width = BOX_WIDTH)));
    out.push_str(&border('╠', '╣'));
    out.push_str(&line(&pad("")));
    out.push_str(&line(&row("Status Code", &status)));
    out.push_str(&line(&row("Instance Name", instance_name)));
    out.push_str(&line(&row("Operation", operation)));
    out.push_str(&line(&row("Duration", &duration)));
    out.push_str(&line(&pad("")));
    out.push_str(&border('╚', '╝'));

    if result.success {
        let data = result.data.clone().unwrap_or(Value::Null);
        let pretty = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
        out.push_str(&format!("Response Data:\n{}\n", pretty));
    } else {
        out.push_str(&format!(
            "Error: {}\n",
            result.error_message().unwrap_or_default()
        ));
    }
    out
}

fn border(left: char, right: char) -> String {
    format!("{}{}{}\n", left, "═".repeat(BOX_WIDTH), right)
}

fn line(content: &str) -> String {
    format!("║{}║\n", content)
}

fn row(label: &str, value: &str) -> String {
    pad(&format!("  {:<17}: {}", label, value))
}

fn pad(text: &str) -> String {
    let len = text.chars().count();
    if len >= BOX_WIDTH {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(BOX_WIDTH - len))
    }
}

/// What the CI job reads back after the run.
#[derive(Debug, Serialize, PartialEq)]
pub struct ResultRecord {
    pub success: bool,
    pub status_code: Option<u16>,
    pub data: Value,
    pub error: Option<String>,
}

impl From<&ExecutionResult> for ResultRecord {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            success: result.success,
            status_code: result.status,
            data: result
                .data
                .clone()
                .unwrap_or_else(|| Value::Object(Default::default())),
            error: result.error_message(),
        }
    }
}

/// `api_result_<build>.json`; anything but ASCII alphanumerics, `-`, `_` and
/// `.` in the build number becomes `_`, so the file stays in the output
/// directory.
pub fn result_file_name(build_number: Option<&str>) -> String {
    let build: String = build_number
        .unwrap_or("unknown")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("api_result_{}.json", build)
}

/// Writes the record as pretty JSON and returns the path written.
#[tracing::instrument(skip(runtime, record))]
pub fn save_result<R: Runtime>(
    runtime: &R,
    output_dir: &Path,
    build_number: Option<&str>,
    record: &ResultRecord,
) -> Result<PathBuf> {
    runtime.create_dir_all(output_dir)?;
    let path = output_dir.join(result_file_name(build_number));
    let json = serde_json::to_vec_pretty(record).context("Failed to serialize result")?;
    runtime.write(&path, &json)?;
    Ok(path)
}
