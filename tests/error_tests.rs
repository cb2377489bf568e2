//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn screen_recorder_bin(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("screen-recorder").expect("binary is built");
    cmd.env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    screen_recorder_bin(dir.path())
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    screen_recorder_bin(dir.path())
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_url() {
    let dir = tempfile::tempdir().unwrap();
    screen_recorder_bin(dir.path())
        .args(["config", "set", "api_url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}

#[test]
fn config_set_invalid_bool() {
    let dir = tempfile::tempdir().unwrap();
    screen_recorder_bin(dir.path())
        .args(["config", "set", "notify", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notify"));
}

#[test]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    screen_recorder_bin(dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    screen_recorder_bin(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn unknown_flag_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    screen_recorder_bin(dir.path())
        .arg("--duration")
        .assert()
        .failure()
        .code(2);
}
