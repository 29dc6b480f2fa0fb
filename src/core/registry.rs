//! Command registry and lookup.
//!
//! The [`CommandManager`] maps command names to factories. Names may span
//! several words (`"show config"`), and lookup consumes as many leading
//! tokens as it needs, handing the rest to the command.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut manager = CommandManager::new("demo");
//! manager.add_command("echo", factory(|_| Box::new(Echo)));
//! let (make, name, rest) = manager.find_command(&["echo".into(), "hi".into()])?;
//! assert_eq!(name, "echo");
//! assert_eq!(rest, vec!["hi"]);
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use super::command::CommandFactory;
use crate::error::{Result, ShellError, suggestions};

/// A resolved lookup: factory, matched name, unconsumed tokens.
pub type FoundCommand = (CommandFactory, String, Vec<String>);

/// Registry of commands, always enumerated in name order.
#[derive(Clone)]
pub struct CommandManager {
    namespace: String,
    commands: BTreeMap<String, CommandFactory>,
}

impl CommandManager {
    /// Create an empty registry.
    ///
    /// `namespace` labels the command set in logs.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            commands: BTreeMap::new(),
        }
    }

    /// The namespace this registry was created with.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register a command, replacing any existing entry of the same name.
    ///
    /// Underscores in `name` are treated as word separators, so
    /// `show_config` registers as `show config`.
    pub fn add_command(&mut self, name: &str, factory: CommandFactory) {
        let name = normalize_name(name);
        debug!(namespace = %self.namespace, command = %name, "registering command");
        self.commands.insert(name, factory);
    }

    /// Iterate `(name, factory)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandFactory)> {
        self.commands.iter().map(|(name, f)| (name.as_str(), f))
    }

    /// Registered names in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Whether a command of exactly this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolve leading tokens of `argv` to a command.
    ///
    /// Tokens are joined one at a time into a candidate name and the first
    /// exact match wins. When nothing matches exactly, the first token may
    /// still select a single-word command it is a unique prefix of.
    ///
    /// # Errors
    ///
    /// - [`ShellError::InvalidCommand`] if an option token is reached first
    /// - [`ShellError::AmbiguousCommand`] if a prefix fits several commands
    /// - [`ShellError::CommandNotFound`] otherwise
    pub fn find_command(&self, argv: &[String]) -> Result<FoundCommand> {
        let mut name = String::new();

        for (consumed, token) in argv.iter().enumerate() {
            if token.starts_with('-') {
                return Err(ShellError::InvalidCommand {
                    token: token.clone(),
                });
            }
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(token);

            if let Some(factory) = self.commands.get(&name) {
                debug!(command = %name, "resolved command");
                return Ok((factory.clone(), name, argv[consumed + 1..].to_vec()));
            }
        }

        let first = argv.first().map(String::as_str).unwrap_or_default();
        if !first.is_empty() {
            let candidates: Vec<&str> = self
                .commands
                .keys()
                .map(String::as_str)
                .filter(|n| !n.contains(' ') && n.starts_with(first))
                .collect();
            match candidates.as_slice() {
                [only] => {
                    debug!(prefix = %first, command = %only, "resolved command by prefix");
                    let factory = self.commands[*only].clone();
                    return Ok((factory, (*only).to_string(), argv[1..].to_vec()));
                }
                [] => {}
                many => {
                    return Err(ShellError::AmbiguousCommand {
                        name: first.to_string(),
                        candidates: many.iter().map(|s| (*s).to_string()).collect(),
                    });
                }
            }
        }

        let wanted = argv.join(" ");
        debug!(command = %wanted, "command not found");
        Err(ShellError::CommandNotFound {
            similar: suggestions::similar_names(&wanted, self.commands.keys().map(String::as_str)),
            name: wanted,
        })
    }
}

impl std::fmt::Debug for CommandManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandManager")
            .field("namespace", &self.namespace)
            .field("commands", &self.names())
            .finish()
    }
}

fn normalize_name(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
