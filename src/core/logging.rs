//! Diagnostic logging to stderr or a log file.
//!
//! Log settings are read from environment variables whose names are derived
//! from the application name, e.g. `CMDSHELL_LOG`, `CMDSHELL_LOG_FORMAT`
//! and `CMDSHELL_LOG_FILE` for an application called `cmdshell`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::util::env::app_env_var;

const LOG_LEVEL_SUFFIX: &str = "LOG";
const LOG_FORMAT_SUFFIX: &str = "LOG_FORMAT";
const LOG_FILE_SUFFIX: &str = "LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs.
    #[default]
    Human,
    /// JSON logs (one event per line).
    Json,
    /// Compact logs (single line, terse).
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from CLI argument, env var, or config value.
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "critical" | "crit" => Some(Self::Error),
            _ => None,
        }
    }

    /// Map `-q` / repeated `-v` flags to a level.
    ///
    /// With neither flag the result is `None`, so lower-precedence
    /// sources get a say.
    #[must_use]
    pub const fn from_verbosity(verbose: u8, quiet: bool) -> Option<Self> {
        if quiet {
            return Some(Self::Error);
        }
        match verbose {
            0 => None,
            1 => Some(Self::Info),
            2 => Some(Self::Debug),
            _ => Some(Self::Trace),
        }
    }

    /// Convert to tracing filter string.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse log level from the `<APP>_LOG` env var.
#[must_use]
pub fn parse_log_level_from_env(app_name: &str) -> Option<LogLevel> {
    non_empty_env(&app_env_var(app_name, LOG_LEVEL_SUFFIX)).and_then(|v| LogLevel::from_arg(&v))
}

/// Parse log format from the `<APP>_LOG_FORMAT` env var.
#[must_use]
pub fn parse_log_format_from_env(app_name: &str) -> Option<LogFormat> {
    non_empty_env(&app_env_var(app_name, LOG_FORMAT_SUFFIX)).and_then(|v| LogFormat::from_arg(&v))
}

/// Parse log file path from the `<APP>_LOG_FILE` env var.
#[must_use]
pub fn parse_log_file_from_env(app_name: &str) -> Option<PathBuf> {
    non_empty_env(&app_env_var(app_name, LOG_FILE_SUFFIX)).map(PathBuf::from)
}

/// Initialize logging with the given settings.
///
/// Only the first call in a process installs a subscriber; later calls
/// are silently ignored.
pub fn init(level: LogLevel, format: LogFormat, log_file: Option<PathBuf>) {
    let file = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
    });

    let make_writer = |file: Option<&std::fs::File>| -> BoxMakeWriter {
        if let Some(file) = file.and_then(|inner| inner.try_clone().ok()) {
            BoxMakeWriter::new(file)
        } else {
            BoxMakeWriter::new(std::io::stderr)
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    let writer = make_writer(file.as_ref());

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(writer)
                .try_init()
                .ok();
        }
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .compact()
                .with_writer(writer)
                .with_target(true)
                .try_init()
                .ok();
        }
        LogFormat::Human => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_target(false)
                .without_time()
                .try_init()
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[allow(unsafe_code)]
    fn with_env_var(key: &str, value: &str, f: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap();
        let prior = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        f();
        match prior {
            Some(val) => unsafe {
                std::env::set_var(key, val);
            },
            None => unsafe {
                std::env::remove_var(key);
            },
        }
    }

    #[test]
    fn test_env_var_log_level_parsing() {
        with_env_var("LOGTEST_APP_LOG", "trace", || {
            assert_eq!(
                parse_log_level_from_env("logtest-app"),
                Some(LogLevel::Trace)
            );
        });

        with_env_var("LOGTEST_APP_LOG", "  ", || {
            assert_eq!(parse_log_level_from_env("logtest-app"), None);
        });
    }

    #[test]
    fn test_env_var_log_format_parsing() {
        with_env_var("LOGTEST_FMT_LOG_FORMAT", "JSON", || {
            assert_eq!(
                parse_log_format_from_env("logtest_fmt"),
                Some(LogFormat::Json)
            );
        });
    }

    #[test]
    fn verbosity_flags_map_to_levels() {
        assert_eq!(LogLevel::from_verbosity(0, false), None);
        assert_eq!(LogLevel::from_verbosity(1, false), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_verbosity(2, false), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_verbosity(5, false), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_verbosity(3, true), Some(LogLevel::Error));
    }

    #[test]
    fn level_aliases() {
        assert_eq!(LogLevel::from_arg("verbose"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_arg("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_arg("crit"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_arg("loud"), None);
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }
}
