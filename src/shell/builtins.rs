//! Built-in shell commands.
//!
//! Built-ins are listed in an explicit table rather than discovered. Names
//! starting with `_` are internal: the loop can invoke them but users
//! cannot type them and they are hidden from help and completion.

use super::interactive::{InteractiveApp, LoopControl};
use crate::error::Result;

/// Runs a built-in with the rest of the line after its name.
pub type Handler = fn(&mut InteractiveApp<'_>, &str) -> Result<LoopControl>;

/// Prints detailed help for a built-in, replacing its one-line doc.
pub type HelpHandler = fn(&mut InteractiveApp<'_>) -> Result<()>;

/// One entry in the built-in table.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub handler: Handler,
    pub doc: &'static str,
    pub help: Option<HelpHandler>,
}

impl Builtin {
    /// Internal built-ins are dispatched by the loop only.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.name.starts_with('_')
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("has_help", &self.help.is_some())
            .finish()
    }
}

/// The built-in table, in registration order.
#[derive(Debug, Clone)]
pub struct Builtins {
    entries: Vec<Builtin>,
}

/// Name of the built-in dispatched when input runs out.
pub const EOF: &str = "_eof";

impl Builtins {
    /// `help`, `history`, `quit`, `exit` and the internal end-of-input handler.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: vec![
                Builtin {
                    name: "help",
                    handler: do_help,
                    doc: "List available commands or show help for one.",
                    help: Some(help_help),
                },
                Builtin {
                    name: "history",
                    handler: do_history,
                    doc: "Show the lines entered in this session.",
                    help: None,
                },
                Builtin {
                    name: "quit",
                    handler: do_quit,
                    doc: "Leave the shell.",
                    help: None,
                },
                Builtin {
                    name: "exit",
                    handler: do_quit,
                    doc: "Leave the shell.",
                    help: None,
                },
                Builtin {
                    name: EOF,
                    handler: do_eof,
                    doc: "Leave the shell at end of input.",
                    help: None,
                },
            ],
        }
    }

    /// Add a built-in, replacing one of the same name.
    pub fn add(&mut self, builtin: Builtin) {
        self.entries.retain(|b| b.name != builtin.name);
        self.entries.push(builtin);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.entries.iter().find(|b| b.name == name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Builtin> {
        self.entries.iter()
    }
}

fn do_help(shell: &mut InteractiveApp<'_>, arg: &str) -> Result<LoopControl> {
    shell.do_help(arg)?;
    Ok(LoopControl::Continue)
}

// The help command knows how to describe itself.
fn help_help(shell: &mut InteractiveApp<'_>) -> Result<()> {
    shell.default_line("help help")?;
    Ok(())
}

fn do_history(shell: &mut InteractiveApp<'_>, _arg: &str) -> Result<LoopControl> {
    let mut out = String::new();
    for (i, entry) in shell.history().enumerate() {
        out.push_str(&format!("  {:4}  {entry}\n", i + 1));
    }
    shell.write(&out)?;
    Ok(LoopControl::Continue)
}

fn do_quit(_shell: &mut InteractiveApp<'_>, _arg: &str) -> Result<LoopControl> {
    Ok(LoopControl::Stop)
}

fn do_eof(shell: &mut InteractiveApp<'_>, _arg: &str) -> Result<LoopControl> {
    shell.write("\n")?;
    Ok(LoopControl::Stop)
}
