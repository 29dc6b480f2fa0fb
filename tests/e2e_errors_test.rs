//! E2E tests for cmdshell error scenarios.
//!
//! Covers:
//! - Unknown commands, with suggestions
//! - Rejected command arguments
//! - JSON error output
//! - Config file problems and their exit codes
//! - Failures inside a command action

use predicates::prelude::*;

mod common;

use cmdshell::test_utils::TestDir;
use common::logger::TestLogger;
use common::{cmdshell_cmd, write_config};

#[test]
fn unknown_command_suggests_close_names() {
    let log = TestLogger::new("unknown_command_suggests_close_names");
    let dir = TestDir::new();

    log.phase("execute");
    cmdshell_cmd(&dir)
        .arg("ecoh")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Error [SHELL-M001]: unknown command \"ecoh\"",
        ))
        .stderr(predicate::str::contains("Did you mean: echo?"))
        .stderr(predicate::str::contains("Fix: cmdshell echo"));

    log.finish_ok();
}

#[test]
fn option_where_command_expected_is_rejected() {
    let dir = TestDir::new();
    cmdshell_cmd(&dir).arg("--bogus").assert().code(2);
}

#[test]
fn bad_argument_is_usage_error() {
    let dir = TestDir::new();
    cmdshell_cmd(&dir)
        .args(["sum", "1", "two"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error [SHELL-I002]"))
        .stderr(predicate::str::contains("two"))
        .stderr(predicate::str::contains("Fix: cmdshell help sum"));
}

#[test]
fn json_errors_are_machine_readable() {
    let log = TestLogger::new("json_errors_are_machine_readable");
    let dir = TestDir::new();

    log.phase("execute");
    let output = cmdshell_cmd(&dir)
        .args(["--json", "ecoh"])
        .output()
        .unwrap();

    log.phase("verify");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    let last = stderr.lines().last().expect("error output");
    let value: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(value["error_code"], "SHELL-M001");
    assert_eq!(value["category"], "Command error");
    assert_eq!(value["exit_code"], 2);

    log.finish_ok();
}

#[test]
fn action_failure_exits_one() {
    let dir = TestDir::new();
    cmdshell_cmd(&dir)
        .args(["sum", &i64::MAX.to_string(), "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error [SHELL-X099]: sum overflows"));
}

#[test]
fn missing_explicit_config_file() {
    let dir = TestDir::new();
    cmdshell_cmd(&dir)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["echo", "hi"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error [SHELL-C001]"));
}

#[test]
fn config_path_from_environment_must_exist() {
    let dir = TestDir::new();
    cmdshell_cmd(&dir)
        .env("CMDSHELL_CONFIG", dir.path().join("absent.toml"))
        .args(["echo", "hi"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn corrupted_config_file() {
    let dir = TestDir::new();
    let path = write_config(&dir, "[shell\nprompt = ");
    cmdshell_cmd(&dir)
        .arg("--config")
        .arg(&path)
        .args(["echo", "hi"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error [SHELL-C002]"));
}

#[test]
fn invalid_config_value() {
    let dir = TestDir::new();
    let path = write_config(&dir, "[shell]\nhistory_size = 0\n");
    cmdshell_cmd(&dir)
        .arg("--config")
        .arg(&path)
        .args(["echo", "hi"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error [SHELL-C003]"))
        .stderr(predicate::str::contains("history_size"));
}

#[test]
fn debug_flag_shows_cause_chain_for_io_errors() {
    let dir = TestDir::new();
    // a directory cannot be read as a config file
    let output = cmdshell_cmd(&dir)
        .arg("--debug")
        .arg("--config")
        .arg(dir.path())
        .args(["echo", "hi"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error [SHELL-X001]"), "{stderr}");
    assert!(stderr.contains("caused by:"), "{stderr}");
}

#[test]
fn no_color_flag_keeps_errors_plain() {
    let dir = TestDir::new();
    cmdshell_cmd(&dir)
        .env_remove("NO_COLOR")
        .env("TERM", "xterm-256color")
        .args(["--no-color", "ecoh"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error [SHELL-M001]"))
        .stderr(predicate::str::contains("\x1b[").not());
}
