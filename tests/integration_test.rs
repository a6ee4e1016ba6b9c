use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

const HANDLER_ENV: &[&str] = &[
    "OPERATION",
    "INSTANCE_NAME",
    "REGION",
    "RETAILER",
    "RETAILER_VARIANT",
    "ACTIVATE",
    "ENABLE_DISABLE_ENTITY",
    "BUILD_USER",
    "BUILD_NUMBER",
    "API_BASE_URL",
    "X_API_KEY",
    "TIMEOUT_SECONDS",
    "RETRY_COUNT",
    "RETRY_BACKOFF",
    "RETRY_POLICY",
    "IGNORE_SSL",
    "OUTPUT_DIR",
];

fn call_cmd(url: &str, payload: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("instapi"));
    cmd.env_remove("RUST_LOG");
    cmd.arg("call")
        .arg("--url")
        .arg(url)
        .arg("--payload")
        .arg(payload)
        .arg("--api-key")
        .arg("test-key-12345")
        .arg("--timeout")
        .arg("10")
        .arg("--backoff-base")
        .arg("0");
    cmd
}

/// `instapi run` with a clean handler environment, writing into `output_dir`.
fn run_cmd(base_url: &str, output_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("instapi"));
    for key in HANDLER_ENV {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG");
    cmd.arg("run")
        .current_dir(output_dir)
        .env("API_BASE_URL", base_url)
        .env("X_API_KEY", "test-key-12345")
        .env("RETRY_BACKOFF", "0")
        .env("OUTPUT_DIR", output_dir);
    cmd
}

fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(prefix))
        .collect()
}

#[test]
fn test_call_prints_status_and_content() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("POST", "/post")
        .match_header("x-api-key", "test-key-12345")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"instanceName": "test-instance"})))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create();

    let output = call_cmd(&format!("{}/post", url), r#"{"instanceName": "test-instance"}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    mock.assert();
    let printed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        printed,
        serde_json::json!({"status": 200, "content": "{\"ok\":true}"})
    );
}

#[test]
fn test_call_invalid_payload_makes_no_request() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server.mock("POST", "/post").expect(0).create();

    call_cmd(&format!("{}/post", url), "{broken")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid JSON payload"));

    mock.assert();
}

#[test]
fn test_call_client_error_is_not_retried() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("POST", "/post")
        .with_status(404)
        .with_body("no such endpoint")
        .expect(1)
        .create();

    call_cmd(&format!("{}/post", url), "{}")
        .arg("--max-retries")
        .arg("3")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 404: no such endpoint"));

    mock.assert();
}

#[test]
fn test_call_server_error_exhausts_attempts() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("PUT", "/post")
        .with_status(503)
        .with_body("busy")
        .expect(2)
        .create();

    call_cmd(&format!("{}/post", url), "{}")
        .arg("--max-retries")
        .arg("2")
        .arg("--method")
        .arg("put")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("All 2 attempts failed"));

    mock.assert();
}

#[test]
fn test_run_update_success_writes_result_and_log() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("PUT", "/api/v1/instance-controller/update")
        .match_header("x-api-key", "test-key-12345")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "instanceName": "acme-us",
            "region": "us-east-1",
            "activate": true,
            "enableDisableEntity": "all",
            "metadata": {"executedBy": "ci-bot", "buildNumber": "42"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"instanceId": "i-123"}"#)
        .expect(1)
        .create();

    let out_dir = tempdir().unwrap();

    run_cmd(&url, out_dir.path())
        .env("OPERATION", "updateInstance")
        .env("INSTANCE_NAME", "acme-us")
        .env("REGION", "us-east-1")
        .env("ACTIVATE", "true")
        .env("BUILD_USER", "ci-bot")
        .env("BUILD_NUMBER", "42")
        .assert()
        .success()
        .stdout(predicate::str::contains("CLIENT SETUP PLATFORM API HANDLER"))
        .stdout(predicate::str::contains("OPERATION COMPLETED SUCCESSFULLY"))
        .stdout(predicate::str::contains("i-123"));

    mock.assert();

    let record: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out_dir.path().join("api_result_42.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(record["success"], true);
    assert_eq!(record["status_code"], 200);
    assert_eq!(record["data"]["instanceId"], "i-123");
    assert_eq!(record["error"], serde_json::Value::Null);

    let logs = files_with_prefix(out_dir.path(), "api_handler_");
    assert_eq!(logs.len(), 1);
    let log_text = std::fs::read_to_string(out_dir.path().join(&logs[0])).unwrap();
    assert!(log_text.contains("Attempt 1 of 3"));
}

#[test]
fn test_run_retries_server_errors_then_fails() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("POST", "/api/v1/instance-controller/deactivate")
        .with_status(500)
        .with_body("internal")
        .expect(2)
        .create();

    let out_dir = tempdir().unwrap();

    run_cmd(&url, out_dir.path())
        .env("OPERATION", "deactivateInstance")
        .env("INSTANCE_NAME", "acme-us")
        .env("RETRY_COUNT", "2")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("OPERATION FAILED"))
        .stdout(predicate::str::contains("Error: HTTP 500: internal"));

    mock.assert();

    let record: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out_dir.path().join("api_result_unknown.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(record["success"], false);
    assert_eq!(record["error"], "HTTP 500: internal");
}

#[test]
fn test_run_invalid_instance_name_makes_no_request() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let out_dir = tempdir().unwrap();

    run_cmd(&url, out_dir.path())
        .env("OPERATION", "onboardInstance")
        .env("INSTANCE_NAME", "bad name!")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CLIENT SETUP PLATFORM API HANDLER"))
        .stderr(predicate::str::contains(
            "Instance name can only contain alphanumeric characters",
        ));

    mock.assert();
    assert!(files_with_prefix(out_dir.path(), "api_result_").is_empty());
}

#[test]
fn test_run_unknown_operation_fails() {
    let server = Server::new();
    let out_dir = tempdir().unwrap();

    run_cmd(&server.url(), out_dir.path())
        .env("OPERATION", "deleteInstance")
        .env("INSTANCE_NAME", "acme")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid operation: deleteInstance"));
}

#[test]
fn test_run_requires_api_key() {
    let server = Server::new();
    let out_dir = tempdir().unwrap();

    run_cmd(&server.url(), out_dir.path())
        .env_remove("X_API_KEY")
        .env("OPERATION", "onboardInstance")
        .env("INSTANCE_NAME", "acme")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CLIENT SETUP PLATFORM API HANDLER"))
        .stderr(predicate::str::contains("API key is not set"));
}
