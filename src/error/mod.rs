//! Error types for cmdshell.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into four categories:
//! - **Command**: Registry lookups that fail (unknown, ambiguous, or invalid names)
//! - **Input**: Lines or arguments the shell or a command parser cannot accept
//! - **Configuration**: Config file parsing, validation, or missing files
//! - **Internal**: I/O failures and errors raised by command actions
//!
//! Each error has a stable error code (e.g., `SHELL-M001`) for programmatic handling.
//!
//! Nothing in the help or dispatch paths recovers locally. Errors bubble up to
//! [`crate::core::app::App::run`] (one-shot mode) or to the interactive loop,
//! which render them and carry on.

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Command lookup issues (unknown, ambiguous, or malformed names).
    Command,
    /// Input issues (malformed quoting, rejected arguments).
    Input,
    /// Configuration issues (parse errors, invalid values, missing files).
    Configuration,
    /// Internal errors (I/O, command failures, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Command => "Command error",
            Self::Input => "Input error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Command => "M",
            Self::Input => "I",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Command action failed or unexpected failure
    GeneralError = 1,
    /// Unknown command, bad arguments, malformed input line
    UsageError = 2,
    /// Config file missing, unreadable, or invalid
    ConfigError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Main error type for cmdshell operations.
#[derive(Error, Debug)]
pub enum ShellError {
    // ==========================================================================
    // Command errors (Category: Command)
    // ==========================================================================
    /// No registered command matches the given tokens.
    #[error("unknown command {name:?}")]
    CommandNotFound {
        name: String,
        /// Registered names close to the requested one.
        similar: Vec<String>,
    },

    /// A prefix matched more than one registered command.
    #[error("ambiguous command {name:?}, could be: {}", .candidates.join(", "))]
    AmbiguousCommand {
        name: String,
        candidates: Vec<String>,
    },

    /// An option token appeared where a command name was expected.
    #[error("invalid command {token:?}")]
    InvalidCommand { token: String },

    // ==========================================================================
    // Input errors (Category: Input)
    // ==========================================================================
    /// Shell-word-splitting failed (unbalanced quotes, dangling escape).
    #[error("malformed line: {reason}")]
    MalformedLine { reason: String },

    /// A command's argument parser rejected its arguments.
    #[error("{message}")]
    Usage { command: String, message: String },

    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Configuration file not found at an explicitly requested path.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: String },

    /// Error parsing configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid { key: String, message: String },

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for errors raised by command actions.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Map error to a process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::CommandNotFound { .. }
            | Self::AmbiguousCommand { .. }
            | Self::InvalidCommand { .. }
            | Self::MalformedLine { .. }
            | Self::Usage { .. } => ExitCode::UsageError,

            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => {
                ExitCode::ConfigError
            }

            Self::Io(_) | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::CommandNotFound { .. }
            | Self::AmbiguousCommand { .. }
            | Self::InvalidCommand { .. } => ErrorCategory::Command,

            Self::MalformedLine { .. } | Self::Usage { .. } => ErrorCategory::Input,

            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => {
                ErrorCategory::Configuration
            }

            Self::Io(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `SHELL-{category}{number}` where category is:
    /// - M: Command
    /// - I: Input
    /// - C: Configuration
    /// - X: Internal
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CommandNotFound { .. } => "SHELL-M001",
            Self::AmbiguousCommand { .. } => "SHELL-M002",
            Self::InvalidCommand { .. } => "SHELL-M003",

            Self::MalformedLine { .. } => "SHELL-I001",
            Self::Usage { .. } => "SHELL-I002",

            Self::ConfigNotFound { .. } => "SHELL-C001",
            Self::ConfigParse { .. } => "SHELL-C002",
            Self::ConfigInvalid { .. } => "SHELL-C003",

            Self::Io(_) => "SHELL-X001",
            Self::Other(_) => "SHELL-X099",
        }
    }

    /// Returns actionable fix suggestions for this error.
    ///
    /// `app_name` is the program name used in suggested commands.
    ///
    /// # Example
    ///
    /// ```
    /// use cmdshell::error::ShellError;
    ///
    /// let err = ShellError::CommandNotFound {
    ///     name: "ecoh".to_string(),
    ///     similar: vec!["echo".to_string()],
    /// };
    /// let suggestions = err.fix_suggestions("demo");
    /// assert!(suggestions[0].commands.iter().any(|c| c == "demo echo"));
    /// ```
    #[must_use]
    pub fn fix_suggestions(&self, app_name: &str) -> Vec<FixSuggestion> {
        match self {
            Self::CommandNotFound { name, similar } => {
                suggestions::command_not_found_suggestions(app_name, name, similar)
            }
            Self::AmbiguousCommand { name, candidates } => {
                suggestions::ambiguous_command_suggestions(app_name, name, candidates)
            }
            Self::InvalidCommand { token } => {
                suggestions::invalid_command_suggestions(app_name, token)
            }
            Self::MalformedLine { reason } => suggestions::malformed_line_suggestions(reason),
            Self::Usage { command, .. } => {
                vec![FixSuggestion::new(
                    vec![format!("{app_name} help {command}")],
                    format!("The arguments given to '{command}' were not accepted."),
                )]
            }
            Self::ConfigNotFound { path } => suggestions::config_not_found_suggestions(path),
            Self::ConfigParse { path, message } => {
                suggestions::config_parse_suggestions(path, message)
            }
            Self::ConfigInvalid { key, message } => {
                suggestions::config_invalid_suggestions(key, message)
            }
            Self::Io(_) | Self::Other(_) => Vec::new(),
        }
    }
}

/// Result type alias for cmdshell operations.
pub type Result<T> = std::result::Result<T, ShellError>;
