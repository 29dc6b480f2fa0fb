//! cmdshell - a framework for command-line applications built from
//! sub-commands.
//!
//! Register commands with a [`core::CommandManager`], hand it to a
//! [`core::App`], and the application gets:
//!
//! - one-shot dispatch: `app echo hello` finds `echo` and runs it,
//! - a registry-aware `-h/--help` that lists every command,
//! - a `help [cmd...]` sub-command,
//! - an interactive shell when started without a command.

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod help;
pub mod render;
pub mod shell;
pub mod storage;
pub mod util;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ExitCode, Result, ShellError};
