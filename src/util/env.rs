//! Environment detection utilities.

use std::io::IsTerminal;

/// Check if stderr is a TTY.
#[must_use]
pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Check if color should be enabled for stderr diagnostics.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }

    // Check NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check TERM=dumb
    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    stderr_is_tty()
}

/// Build an application-scoped environment variable name.
///
/// The application name is upper-cased and `-` becomes `_`, so
/// `app_env_var("my-tool", "CONFIG")` is `MY_TOOL_CONFIG`.
#[must_use]
pub fn app_env_var(app_name: &str, suffix: &str) -> String {
    let prefix: String = app_name
        .chars()
        .map(|c| match c {
            '-' | ' ' | '.' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect();
    format!("{prefix}_{suffix}")
}
