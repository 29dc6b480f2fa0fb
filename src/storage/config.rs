//! Configuration file loading and management.
//!
//! Loads configuration from `<config-dir>/<app-name>/config.toml`:
//! - Linux: `~/.config/<app-name>/config.toml`
//! - macOS: `~/Library/Application Support/<app-name>/config.toml`
//! - Windows: `%APPDATA%/<app-name>/config/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! Names are prefixed with the upper-cased application name:
//! - `<APP>_CONFIG`: Override config file path
//! - `<APP>_PROMPT`: Interactive shell prompt
//! - `<APP>_LOG`, `<APP>_LOG_FORMAT`, `<APP>_LOG_FILE`: see [`crate::core::logging`]

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::AppPaths;
use crate::cli::args::GlobalArgs;
use crate::core::logging::{self, LogFormat, LogLevel};
use crate::error::{Result, ShellError};
use crate::util::env::app_env_var;

// =============================================================================
// Environment Variable Suffixes
// =============================================================================

/// Suffix of the environment variable that overrides the config file path.
pub const ENV_CONFIG_SUFFIX: &str = "CONFIG";
/// Suffix of the environment variable for the shell prompt.
pub const ENV_PROMPT_SUFFIX: &str = "PROMPT";

/// Default number of lines kept by the shell `history` built-in.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Interactive shell prompt.
    pub prompt: String,
    /// Banner written when the interactive shell starts.
    pub intro: Option<String>,
    /// Number of lines kept in shell history.
    pub history_size: usize,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Log output format.
    pub log_format: LogFormat,
    /// Log file (stderr when unset).
    pub log_file: Option<PathBuf>,
    /// Config file that was consulted.
    pub config_path: PathBuf,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub prompt: ConfigSource,
    pub log_level: ConfigSource,
    pub log_file: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Built-in defaults for an application, without touching disk or env.
    #[must_use]
    pub fn defaults(app_name: &str) -> Self {
        Self {
            prompt: default_prompt(app_name),
            intro: None,
            history_size: DEFAULT_HISTORY_SIZE,
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            log_file: None,
            config_path: AppPaths::new(app_name).config_file(),
            sources: ConfigSources::default(),
        }
    }

    /// Resolve final configuration from CLI args, environment variables, and config file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly requested config file does not exist
    /// - The config file exists but is invalid
    pub fn resolve(app_name: &str, args: &GlobalArgs) -> Result<Self> {
        let (config_path, explicit) = Self::config_path(app_name, args);
        if explicit && !config_path.exists() {
            return Err(ShellError::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }
        let config = Config::load_from(&config_path)?;
        config.validate()?;

        let mut sources = ConfigSources::default();

        let prompt = Self::resolve_prompt(app_name, &config, &mut sources.prompt);
        let log_level = Self::resolve_log_level(app_name, args, &config, &mut sources.log_level)?;
        let log_file = Self::resolve_log_file(app_name, args, &config, &mut sources.log_file);
        let log_format = match logging::parse_log_format_from_env(app_name) {
            Some(format) => format,
            None => config
                .logging
                .format
                .as_deref()
                .and_then(LogFormat::from_arg)
                .unwrap_or_default(),
        };

        Ok(Self {
            prompt,
            intro: config.shell.intro,
            history_size: config.shell.history_size,
            log_level,
            log_format,
            log_file,
            config_path,
            sources,
        })
    }

    /// Config file location and whether the user asked for it explicitly.
    fn config_path(app_name: &str, args: &GlobalArgs) -> (PathBuf, bool) {
        if let Some(path) = &args.config {
            return (path.clone(), true);
        }
        if let Ok(path) = std::env::var(app_env_var(app_name, ENV_CONFIG_SUFFIX)) {
            if !path.trim().is_empty() {
                return (PathBuf::from(path), true);
            }
        }
        (AppPaths::new(app_name).config_file(), false)
    }

    fn resolve_prompt(app_name: &str, config: &Config, source: &mut ConfigSource) -> String {
        // 1. Environment variable
        if let Ok(prompt) = std::env::var(app_env_var(app_name, ENV_PROMPT_SUFFIX)) {
            *source = ConfigSource::Env;
            return prompt;
        }

        // 2. Config file
        if let Some(prompt) = &config.shell.prompt {
            *source = ConfigSource::ConfigFile;
            return prompt.clone();
        }

        // 3. Default
        *source = ConfigSource::Default;
        default_prompt(app_name)
    }

    fn resolve_log_level(
        app_name: &str,
        args: &GlobalArgs,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<LogLevel> {
        // 1. CLI -v / -q flags
        if let Some(level) = LogLevel::from_verbosity(args.verbose, args.quiet) {
            *source = ConfigSource::Cli;
            return Ok(level);
        }

        // 2. Environment variable
        if let Some(level) = logging::parse_log_level_from_env(app_name) {
            *source = ConfigSource::Env;
            return Ok(level);
        }

        // 3. Config file
        if let Some(level) = &config.logging.level {
            *source = ConfigSource::ConfigFile;
            return LogLevel::from_arg(level).ok_or_else(|| ShellError::ConfigInvalid {
                key: "logging.level".to_string(),
                message: format!("unknown level \"{level}\""),
            });
        }

        // 4. Default
        *source = ConfigSource::Default;
        Ok(LogLevel::default())
    }

    fn resolve_log_file(
        app_name: &str,
        args: &GlobalArgs,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Option<PathBuf> {
        if let Some(path) = &args.log_file {
            *source = ConfigSource::Cli;
            return Some(path.clone());
        }
        if let Some(path) = logging::parse_log_file_from_env(app_name) {
            *source = ConfigSource::Env;
            return Some(path);
        }
        if let Some(path) = &config.logging.file {
            *source = ConfigSource::ConfigFile;
            return Some(path.clone());
        }
        *source = ConfigSource::Default;
        None
    }
}

fn default_prompt(app_name: &str) -> String {
    format!("({app_name}) ")
}

/// Application configuration as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interactive shell settings.
    pub shell: ShellConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Interactive shell settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt shown before each line.
    pub prompt: Option<String>,
    /// Banner written when the shell starts.
    pub intro: Option<String>,
    /// Number of lines kept by the `history` built-in.
    pub history_size: usize,
}

/// Logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level (error, warn, info, debug, trace).
    pub level: Option<String>,
    /// Log format (human, json, compact).
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: None,
            intro: None,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ShellError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate configuration values.
    ///
    /// Checks that:
    /// - `shell.history_size` is non-zero
    /// - `logging.format` is one of human, json, compact
    pub fn validate(&self) -> Result<()> {
        if self.shell.history_size == 0 {
            return Err(ShellError::ConfigInvalid {
                key: "shell.history_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if let Some(format) = &self.logging.format {
            if LogFormat::from_arg(format).is_none() {
                return Err(ShellError::ConfigInvalid {
                    key: "logging.format".to_string(),
                    message: format!("\"{format}\" is not one of human, json, compact"),
                });
            }
        }

        Ok(())
    }
}
