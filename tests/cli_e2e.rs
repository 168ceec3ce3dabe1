//! End-to-end CLI tests for the uspto-odp binary.

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("uspto-odp").unwrap();
    cmd.env_remove("USPTO_API_KEY")
        .env_remove("USPTO_ODP_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Open Data Portal"))
        .stdout(predicate::str::contains("download"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("uspto-odp"));
}

/// Test that a missing subcommand causes non-zero exit.
#[test]
fn test_binary_without_subcommand_fails() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}

/// Test that a missing API key is reported before any request.
#[test]
fn test_binary_missing_api_key_fails() {
    cmd()
        .args(["wrapper", "16123456"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key provided"));
}

/// Test that verbose logging never prints the API key.
#[test]
fn test_binary_verbose_does_not_log_api_key() {
    cmd()
        .args([
            "-v",
            "--api-key",
            "SECRET-KEY-123",
            "--base-url",
            "http://127.0.0.1:9",
            "wrapper",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CLI arguments parsed"))
        .stderr(predicate::str::contains("SECRET-KEY-123").not());
}

/// Test that the wrapper subcommand prints mapped JSON to stdout.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_wrapper_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/12345678"))
        .and(header("X-API-KEY", "cli-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patentFileWrapperDataBag": [{
                "applicationNumberText": "12345678",
                "applicationMetaData": {"filingDate": "2020-01-15", "inventionTitle": "Widget"}
            }]
        })))
        .mount(&server)
        .await;

    let base_url = format!("{}/applications", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        cmd()
            .env("USPTO_API_KEY", "cli-key")
            .args(["-q", "--base-url", &base_url, "wrapper", "12345678"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invention_title\": \"Widget\""))
        .stdout(predicate::str::contains("\"filing_date\": \"2020-01-15\""));
}

/// Test that an API error exits non-zero with the error text.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_api_error_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/1/documents"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let base_url = format!("{}/applications", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        cmd()
            .args(["-q", "--api-key", "k", "--base-url", &base_url, "documents", "1"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("USPTO API error 404: Not Found"));
}
