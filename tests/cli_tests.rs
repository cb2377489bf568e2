//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn screen_recorder_bin() -> Command {
    let mut cmd = Command::cargo_bin("screen-recorder").expect("binary is built");
    // Keep the user's config file and service out of the picture
    cmd.env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .env("API_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    screen_recorder_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--api-url"))
        .stdout(predicate::str::contains("--download-dir"))
        .stdout(predicate::str::contains("--notify"))
        .stdout(predicate::str::contains("--no-system-audio"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_output() {
    screen_recorder_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("screen-recorder"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    screen_recorder_bin()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("screen-recorder"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help() {
    screen_recorder_bin()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_roundtrip_in_temp_dir() {
    let dir = tempfile::tempdir().unwrap();

    screen_recorder_bin()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["config", "set", "api_url", "https://rec.example.com/"])
        .assert()
        .success();

    screen_recorder_bin()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["config", "get", "api_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://rec.example.com"));
}

#[test]
fn interactive_status_then_quit() {
    screen_recorder_bin()
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Idle"))
        .stderr(predicate::str::contains("http://127.0.0.1:9"));
}

#[test]
fn end_of_input_exits() {
    screen_recorder_bin().write_stdin("").assert().success();
}

#[test]
fn unknown_command_warns() {
    screen_recorder_bin()
        .write_stdin("dance\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command 'dance'"));
}

#[test]
fn stop_while_idle_is_refused() {
    screen_recorder_bin()
        .write_stdin("stop\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Not recording"));
}

#[test]
fn download_before_recording_is_refused() {
    screen_recorder_bin()
        .write_stdin("download\nupload\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("No recording to download yet"))
        .stderr(predicate::str::contains("No recording to upload yet"));
}

#[test]
fn list_against_unreachable_service_reports_failure() {
    screen_recorder_bin()
        .write_stdin("list\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to fetch recordings"));
}
