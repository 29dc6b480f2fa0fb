//! Test utilities for cmdshell.
//!
//! Provides shared helpers and stub commands for use across all test
//! modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cmdshell::test_utils::*;
//!
//! let out = SharedBuffer::new();
//! let app = make_test_app(&[("foo", "Does foo")], &out);
//! app.run_subcommand(&["foo".to_string()]).unwrap();
//! assert!(out.contents().contains("stub ran: foo"));
//! ```

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::Path;
use std::rc::Rc;

use clap::{Arg, ArgAction, ArgMatches};

use crate::core::app::App;
use crate::core::command::{Command, CommandFactory, factory};
use crate::core::registry::CommandManager;
use crate::error::Result;

// =============================================================================
// Output Capture
// =============================================================================

/// A cloneable in-memory writer. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.borrow()).into_owned()
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

impl IoWrite for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Stub Commands
// =============================================================================

/// A command that reports it ran and does nothing else.
pub struct StubCommand {
    name: String,
    description: String,
    accepts_args: bool,
}

impl StubCommand {
    /// Factory for an anonymous stub with the given description.
    #[must_use]
    pub fn factory(description: impl Into<String>) -> CommandFactory {
        Self::named("stub", description)
    }

    /// Factory for a stub that prints `stub ran: <name>` when run.
    #[must_use]
    pub fn named(name: impl Into<String>, description: impl Into<String>) -> CommandFactory {
        let name = name.into();
        let description = description.into();
        factory(move |_args| {
            Box::new(Self {
                name: name.clone(),
                description: description.clone(),
                accepts_args: false,
            })
        })
    }

    /// Like [`StubCommand::named`], but accepts any trailing arguments and
    /// prints them as a debug list.
    #[must_use]
    pub fn with_args(name: impl Into<String>, description: impl Into<String>) -> CommandFactory {
        let name = name.into();
        let description = description.into();
        factory(move |_args| {
            Box::new(Self {
                name: name.clone(),
                description: description.clone(),
                accepts_args: true,
            })
        })
    }
}

impl Command for StubCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn parser(&self, prog_name: &str) -> clap::Command {
        let cmd = clap::Command::new(prog_name.to_string()).about(self.description.clone());
        if self.accepts_args {
            cmd.arg(
                Arg::new("args")
                    .action(ArgAction::Append)
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true),
            )
        } else {
            cmd
        }
    }

    fn take_action(&mut self, app: &App, matches: &ArgMatches) -> Result<i32> {
        if self.accepts_args {
            let args: Vec<String> = matches
                .get_many::<String>("args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            app.write_out(&format!("stub ran: {} {args:?}\n", self.name))?;
        } else {
            app.write_out(&format!("stub ran: {}\n", self.name))?;
        }
        Ok(0)
    }
}

// =============================================================================
// Test Applications
// =============================================================================

/// Build an app named `test-app` with one stub per `(name, description)`.
///
/// Stdout goes to `out`; stderr is discarded.
#[must_use]
pub fn make_test_app(commands: &[(&str, &str)], out: &SharedBuffer) -> App {
    make_test_app_with_stderr(commands, out, &SharedBuffer::new())
}

/// Like [`make_test_app`], capturing stderr into `err`.
#[must_use]
pub fn make_test_app_with_stderr(
    commands: &[(&str, &str)],
    out: &SharedBuffer,
    err: &SharedBuffer,
) -> App {
    let mut manager = CommandManager::new("test-app");
    for (name, description) in commands {
        manager.add_command(name, StubCommand::named(*name, *description));
    }
    App::new("test-app", "0.0.1", "An application for tests", manager)
        .with_output(Box::new(out.clone()), Box::new(err.clone()))
}

// =============================================================================
// Temporary Directories
// =============================================================================

/// An isolated temporary directory, removed on drop.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file in the temporary directory with the given content.
    ///
    /// Creates parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.inner.path().join(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
