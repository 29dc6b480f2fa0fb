//! Shared helpers for integration tests.
//!
//! - `log_capture`: collect `tracing` events emitted on the current thread
//! - `logger`: per-test progress logging
//!
//! [`cmdshell_cmd`] runs the binary with an isolated environment: config
//! directories point into a fresh temporary directory and every
//! `CMDSHELL_*` variable is cleared.

#![allow(dead_code)]

pub mod log_capture;
pub mod logger;

use assert_cmd::Command;
use cmdshell::test_utils::TestDir;

const APP_ENV_VARS: &[&str] = &[
    "CMDSHELL_CONFIG",
    "CMDSHELL_PROMPT",
    "CMDSHELL_LOG",
    "CMDSHELL_LOG_FORMAT",
    "CMDSHELL_LOG_FILE",
    "RUST_LOG",
];

/// The `cmdshell` binary, isolated inside `dir`.
#[allow(deprecated)]
pub fn cmdshell_cmd(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("cmdshell").expect("cmdshell binary");
    for var in APP_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

/// Write `content` as the isolated config file for `dir` and return its path.
pub fn write_config(dir: &TestDir, content: &str) -> std::path::PathBuf {
    dir.create_file("custom/config.toml", content);
    dir.path().join("custom/config.toml")
}
