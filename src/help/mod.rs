//! Registry-aware help.
//!
//! Two entry points share one job, telling the user which commands exist:
//!
//! - [`HelpAction`] runs when the top-level `-h/--help` flag is given. It
//!   prints the application's own help followed by every registered command
//!   and its description, then asks the caller to exit.
//! - [`HelpCommand`] is the `help [cmd...]` sub-command. It prints the full
//!   help of one command, or its own help when given no name.

use std::io::Write;

use clap::{Arg, ArgAction, ArgMatches};

use crate::core::app::App;
use crate::core::command::{Command, CommandFactory, factory};
use crate::core::registry::CommandManager;
use crate::error::Result;

/// Width of the name column in the command listing.
pub const NAME_COLUMN_WIDTH: usize = 13;

/// What the caller should do after an action has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    /// Carry on with normal processing.
    Continue,
    /// Stop and exit the process with this status.
    Exit(i32),
}

/// Handler for the top-level help flag.
pub struct HelpAction<'a> {
    command_manager: &'a CommandManager,
}

impl<'a> HelpAction<'a> {
    #[must_use]
    pub const fn new(command_manager: &'a CommandManager) -> Self {
        Self { command_manager }
    }

    /// Render the parser help followed by the command listing.
    #[must_use]
    pub fn render(&self, parser: &mut clap::Command) -> String {
        let mut out = parser.render_help().to_string();
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push_str("\n\n");
        out.push_str(&render_command_list(self.command_manager));
        out
    }

    /// Write the help text to `out` and request a successful exit.
    pub fn invoke(&self, parser: &mut clap::Command, out: &mut dyn Write) -> Result<ActionResult> {
        out.write_all(self.render(parser).as_bytes())?;
        out.flush()?;
        Ok(ActionResult::Exit(0))
    }
}

/// The `Commands:` section: one line per command, sorted by name.
///
/// Each command is built with no arguments so its description can be read.
#[must_use]
pub fn render_command_list(command_manager: &CommandManager) -> String {
    let mut out = String::from("Commands:\n");
    for (name, make) in command_manager.iter() {
        let cmd = make(&[]);
        out.push_str(&format!(
            "  {name:<width$}  {}\n",
            cmd.description(),
            width = NAME_COLUMN_WIDTH
        ));
    }
    out
}

/// `help [cmd...]`: print detailed help for another command.
pub struct HelpCommand;

impl HelpCommand {
    /// Factory for registering the help command.
    #[must_use]
    pub fn factory() -> CommandFactory {
        factory(|_args| Box::new(Self))
    }
}

impl Command for HelpCommand {
    fn description(&self) -> &str {
        "print detailed help for another command"
    }

    fn parser(&self, prog_name: &str) -> clap::Command {
        clap::Command::new(prog_name.to_string())
            .about(self.description().to_string())
            .arg(
                Arg::new("cmd")
                    .help("name of the command")
                    .action(ArgAction::Append)
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true),
            )
    }

    fn take_action(&mut self, app: &App, matches: &ArgMatches) -> Result<i32> {
        let words: Vec<String> = matches
            .get_many::<String>("cmd")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let mut parser = if words.is_empty() {
            self.parser(&format!("{} help", app.name()))
        } else {
            let (make, name, search_args) = app.command_manager().find_command(&words)?;
            let target = make(&search_args);
            target.parser(&format!("{} {}", app.name(), name))
        };

        app.write_out(&parser.render_help().to_string())?;
        Ok(0)
    }
}
