// ABOUTME: Integration tests for the stackshift CLI commands.
// ABOUTME: Validates --help output, init behavior, and early validation failures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn stackshift_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stackshift"));
    // Never reach a real account from tests.
    cmd.env("AWS_CONFIG_FILE", "/dev/null")
        .env("AWS_SHARED_CREDENTIALS_FILE", "/dev/null");
    cmd
}

#[test]
fn help_shows_commands() {
    stackshift_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn deploy_help_lists_parameter_flags() {
    stackshift_cmd()
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--bucket"))
        .stdout(predicate::str::contains("--storage-class"))
        .stdout(predicate::str::contains("--key-parameter"))
        .stdout(predicate::str::contains("--resource"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("stackshift.yml");

    stackshift_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--bucket", "artifacts", "--stack", "orders"])
        .assert()
        .success();

    assert!(config_path.exists(), "stackshift.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("bucket: artifacts"));
    assert!(content.contains("stack: orders"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("stackshift.yml");

    fs::write(&config_path, "bucket: existing\n").unwrap();

    stackshift_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "bucket: existing\n");
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("stackshift.yml");
    fs::write(&config_path, "bucket: existing\n").unwrap();

    stackshift_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    assert!(fs::read_to_string(&config_path).unwrap().contains("key_parameter: S3Key"));
}

#[test]
fn deploy_without_bucket_names_the_parameter() {
    let temp_dir = tempfile::tempdir().unwrap();

    stackshift_cmd()
        .current_dir(temp_dir.path())
        .args(["deploy", "-k", "workflow.json", "-f", "workflow.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation failed: bucket: must be provided"));
}

#[test]
fn unknown_destination_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("stackshift.yml"), "bucket: artifacts\n").unwrap();

    stackshift_cmd()
        .current_dir(temp_dir.path())
        .args(["check", "--destination", "qa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown destination: qa"));
}

#[test]
fn zero_poll_interval_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    stackshift_cmd()
        .current_dir(temp_dir.path())
        .args(["deploy", "--poll-interval", "0s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("initial_interval"));
}

#[test]
fn quiet_and_json_conflict() {
    stackshift_cmd()
        .args(["--quiet", "--json", "check"])
        .assert()
        .failure();
}
