//! The unit of work dispatched by an [`App`].
//!
//! A command is built fresh for every invocation by a [`CommandFactory`],
//! describes itself in one line, builds a `clap` parser for its own
//! arguments, and then acts on the parsed matches.

use std::sync::Arc;

use clap::ArgMatches;

use crate::core::app::App;
use crate::error::Result;

/// Builds a command instance from the tokens left over after name lookup.
///
/// Factories receive no application reference, so building one must be
/// cheap and free of side effects. The help listing builds every
/// registered command just to read its description.
pub type CommandFactory = Arc<dyn Fn(&[String]) -> Box<dyn Command> + Send + Sync>;

/// Wrap a closure as a [`CommandFactory`].
pub fn factory<F>(f: F) -> CommandFactory
where
    F: Fn(&[String]) -> Box<dyn Command> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A sub-command.
pub trait Command {
    /// One-line description for help listings.
    fn description(&self) -> &str;

    /// Build the argument parser, named `prog_name` in usage lines.
    ///
    /// The default parser accepts no arguments.
    fn parser(&self, prog_name: &str) -> clap::Command {
        clap::Command::new(prog_name.to_string()).about(self.description().to_string())
    }

    /// Do the work. Returns the exit code.
    fn take_action(&mut self, app: &App, matches: &ArgMatches) -> Result<i32>;

    /// Entry point used by the dispatcher.
    ///
    /// Override to wrap [`Command::take_action`] with setup or teardown.
    fn run(&mut self, app: &App, matches: &ArgMatches) -> Result<i32> {
        self.take_action(app, matches)
    }
}
