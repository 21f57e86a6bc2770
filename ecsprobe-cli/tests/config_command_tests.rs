//! Integration tests for `ecsprobe config` and configuration loading.
//!
//! Tests config validation and display functionality with real TOML files.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

use ecsprobe_core::config::ProbeConfig;

fn ecsprobe(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ecsprobe"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ecsprobe.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[aws]
region = "us-east-1"

[outputs]
source = "file"
path = "outputs.json"

[verify]
checks = ["cluster", "service", "task_definition"]
features = ["with_service_discovery"]
deadline_secs = 120
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let config = ProbeConfig::load(&config_path)
        .await
        .expect("valid config should load successfully");

    // Then: Values are taken from the file
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.aws.region(), Some("us-east-1"));
    assert_eq!(config.verify.plan().expect("valid plan").len(), 3);
    assert_eq!(
        config.verify.deadline(),
        Some(std::time::Duration::from_secs(120))
    );
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    // Given: A malformed TOML file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");

    fs::write(&config_path, "[general\nlog_level = \"info\"\n").expect("should write bad config");

    // When: Loading the config
    let result = ProbeConfig::load(&config_path).await;

    // Then: Should fail
    assert!(result.is_err(), "malformed TOML should fail to load");
}

#[tokio::test]
async fn test_config_validate_missing_file() {
    let config_path = std::path::PathBuf::from("/nonexistent/ecsprobe.toml");

    let result = ProbeConfig::load(&config_path).await;

    assert!(result.is_err(), "missing file should fail to load");
}

#[tokio::test]
async fn test_config_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("absent.toml");

    let config = ProbeConfig::load_or_default(&config_path)
        .await
        .expect("missing file should fall back to defaults");

    assert_eq!(config.outputs.source, "file");
    assert_eq!(config.verify.checks.len(), 7);
}

#[tokio::test]
async fn test_config_validate_empty_file() {
    // Given: An empty config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");

    fs::write(&config_path, "").expect("should write empty file");

    // When: Loading the config
    let config = ProbeConfig::load(&config_path)
        .await
        .expect("empty config should use defaults");

    // Then: Defaults apply
    assert_eq!(config.general.log_level, "info");
    assert!(config.verify.features.is_empty());
}

#[tokio::test]
async fn test_config_unknown_check_rejected() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ecsprobe.toml");

    fs::write(&config_path, "[verify]\nchecks = [\"cluster\", \"database\"]\n")
        .expect("should write config");

    let err = ProbeConfig::load(&config_path).await.unwrap_err();

    assert!(err.to_string().contains("verify.checks"), "got: {err}");
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn test_binary_checks_json() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = ecsprobe(&temp_dir)
        .args(["checks", "--output", "json"])
        .output()
        .expect("binary should run");

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(
        parsed["checks"].as_array().expect("should be array").len(),
        7
    );
}

#[test]
fn test_binary_config_validate_invalid_exits_2() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("ecsprobe.toml"),
        "[general]\nlog_format = \"xml\"\n",
    )
    .expect("should write config");

    let output = ecsprobe(&temp_dir)
        .args(["config", "validate"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("INVALID"), "stdout: {stdout}");
}

#[test]
fn test_binary_verify_unknown_check_exits_2() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = ecsprobe(&temp_dir)
        .args(["verify", "--check", "database"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_binary_verify_missing_outputs_exits_3() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = ecsprobe(&temp_dir)
        .args(["verify", "--outputs", "missing.json"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.json"), "stderr: {stderr}");
}
