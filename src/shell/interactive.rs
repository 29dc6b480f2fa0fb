//! The interactive shell.
//!
//! [`InteractiveApp`] reads lines, runs built-ins from its table and hands
//! everything else to [`App::run_subcommand`], so the shell and one-shot
//! mode share a single dispatcher. Help and completion merge the built-ins
//! with the registry.

use std::collections::{BTreeSet, VecDeque};
use std::io::BufRead;

use tracing::{debug, info};

use super::builtins::{self, Builtins};
use super::columns::print_topics;
use super::words;
use crate::core::app::App;
use crate::core::registry::CommandManager;
use crate::error::Result;

/// Header above the built-in topics in the help index.
pub const DOC_HEADER: &str = "Shell commands (type help <topic>):";
/// Header above the registry commands in the help index.
pub const APP_CMD_HEADER: &str = "Application commands (type help <topic>):";

/// Display width of the help index. `print_topics` lays columns out in one
/// less (79) so a full row never wraps.
const HELP_WIDTH: usize = 80;

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// A line-oriented shell over an application's commands.
pub struct InteractiveApp<'a> {
    parent_app: &'a App,
    command_manager: &'a CommandManager,
    builtins: Builtins,
    prompt: String,
    intro: Option<String>,
    history: VecDeque<String>,
    history_size: usize,
}

impl<'a> InteractiveApp<'a> {
    /// Create a shell for `parent_app`, taking prompt, intro and history
    /// size from its configuration.
    #[must_use]
    pub fn new(parent_app: &'a App, command_manager: &'a CommandManager) -> Self {
        let config = parent_app.config();
        Self {
            parent_app,
            command_manager,
            builtins: Builtins::standard(),
            prompt: config.prompt.clone(),
            intro: config.intro.clone(),
            history: VecDeque::new(),
            history_size: config.history_size,
        }
    }

    /// Replace the built-in table.
    #[must_use]
    pub fn with_builtins(mut self, builtins: Builtins) -> Self {
        self.builtins = builtins;
        self
    }

    /// Lines entered so far, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> + '_ {
        self.history.iter().map(String::as_str)
    }

    /// Write to the application's stdout.
    pub fn write(&self, text: &str) -> Result<()> {
        self.parent_app.write_out(text)
    }

    /// Read and run lines from `input` until a built-in stops the loop.
    ///
    /// A failing line is reported and the loop moves on. End of input runs
    /// the internal end-of-input built-in.
    pub fn cmdloop(&mut self, input: &mut dyn BufRead) -> Result<()> {
        if let Some(intro) = &self.intro {
            self.write(&format!("{intro}\n"))?;
        }

        loop {
            self.write(&self.prompt)?;
            let mut line = String::new();
            let result = if input.read_line(&mut line)? == 0 {
                self.run_builtin(builtins::EOF, "")
            } else {
                self.onecmd(line.trim_end_matches(['\n', '\r']))
            };

            match result {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Stop) => break,
                Err(err) => {
                    debug!(code = err.error_code(), "shell line failed");
                    self.parent_app.report_error(&err);
                }
            }
        }

        info!("leaving interactive mode");
        Ok(())
    }

    /// Interpret one line.
    ///
    /// Blank lines do nothing and `?` is short for `help`. The first word
    /// selects a built-in; any other line goes to [`Self::default_line`].
    pub fn onecmd(&mut self, line: &str) -> Result<LoopControl> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LoopControl::Continue);
        }
        self.push_history(line);

        let expanded;
        let line = match line.strip_prefix('?') {
            Some(rest) => {
                expanded = format!("help {rest}");
                expanded.as_str()
            }
            None => line,
        };

        let (first, rest) = match line.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim_start()),
            None => (line, ""),
        };

        if !first.starts_with('_') && self.builtins.get(first).is_some() {
            return self.run_builtin(first, rest);
        }
        self.default_line(line)
    }

    fn run_builtin(&mut self, name: &str, arg: &str) -> Result<LoopControl> {
        match self.builtins.get(name) {
            Some(builtin) => {
                debug!(builtin = name, "running built-in");
                (builtin.handler)(self, arg)
            }
            None => Ok(LoopControl::Continue),
        }
    }

    /// Split `line` into words and run them as a sub-command.
    ///
    /// # Errors
    ///
    /// Malformed quoting, and any error from the sub-command.
    pub fn default_line(&mut self, line: &str) -> Result<LoopControl> {
        let parts = words::split(line)?;
        if parts.is_empty() {
            return Ok(LoopControl::Continue);
        }
        let code = self.parent_app.run_subcommand(&parts)?;
        if code != 0 {
            debug!(code, "command returned non-zero status");
        }
        Ok(LoopControl::Continue)
    }

    /// Registry names starting with `text`, sorted. Options are not completed.
    #[must_use]
    pub fn complete_default(&self, text: &str) -> Vec<String> {
        self.command_manager
            .names()
            .into_iter()
            .filter(|name| name.starts_with(text))
            .map(str::to_string)
            .collect()
    }

    /// Completions for `text`, which starts at `begidx` in `line`.
    ///
    /// The first word completes against built-ins and registry commands;
    /// later words against registry commands only.
    #[must_use]
    pub fn complete(&self, text: &str, line: &str, begidx: usize) -> Vec<String> {
        let leading = line.len() - line.trim_start().len();
        if begidx > leading {
            return self.complete_default(text);
        }

        let mut names: BTreeSet<String> = self
            .builtin_topics()
            .into_iter()
            .filter(|name| name.starts_with(text))
            .map(str::to_string)
            .collect();
        names.extend(self.complete_default(text));
        names.into_iter().collect()
    }

    /// Handler names (`do_<name>`) for the built-ins, internal ones excluded.
    #[must_use]
    pub fn get_names(&self) -> Vec<String> {
        self.builtins
            .iter()
            .map(|b| format!("do_{}", b.name))
            .filter(|name| !name.starts_with("do__"))
            .collect()
    }

    /// Built-in help when `arg` names a built-in, otherwise the `help`
    /// command. With no argument, an index of built-ins and commands.
    ///
    /// # Errors
    ///
    /// Malformed quoting in `arg`, or a failure from the `help` command
    /// such as an unknown name.
    pub fn do_help(&mut self, arg: &str) -> Result<()> {
        let arg = arg.trim();
        if arg.is_empty() {
            let index = self.help_index();
            return self.write(&index);
        }

        let parts = words::split(arg)?;
        let handler_name = std::iter::once("do")
            .chain(
                parts
                    .iter()
                    .map(String::as_str)
                    .take_while(|part| !part.starts_with('-')),
            )
            .collect::<Vec<_>>()
            .join("_");

        let builtin = handler_name
            .strip_prefix("do_")
            .filter(|_| self.get_names().contains(&handler_name))
            .and_then(|name| self.builtins.get(name));
        if let Some(builtin) = builtin {
            return match builtin.help {
                Some(help) => help(self),
                None => self.write(&format!("{}\n", builtin.doc)),
            };
        }

        self.default_line(&format!("help {arg}"))?;
        Ok(())
    }

    fn builtin_topics(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .builtins
            .iter()
            .filter(|b| !b.is_internal())
            .map(|b| b.name)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn help_index(&self) -> String {
        let mut out = print_topics(DOC_HEADER, &self.builtin_topics(), HELP_WIDTH);
        out.push_str(&print_topics(
            APP_CMD_HEADER,
            &self.command_manager.names(),
            HELP_WIDTH,
        ));
        out
    }

    fn push_history(&mut self, line: &str) {
        if self.history.back().is_some_and(|last| last == line) {
            return;
        }
        self.history.push_back(line.to_string());
        while self.history.len() > self.history_size {
            self.history.pop_front();
        }
    }
}
