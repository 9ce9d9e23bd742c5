//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("pollfinder").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("MongoDB connection string"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_serve_refuses_to_start_without_connection_string() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("pollfinder").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("MONGODB_CONNECTION_STRING")
        .arg("serve");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("MONGODB_CONNECTION_STRING not set"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("pollfinder").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
