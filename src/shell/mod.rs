//! Interactive shell mode.
//!
//! Entered when the application is started without a command. See
//! [`InteractiveApp`].

pub mod builtins;
pub mod columns;
pub mod interactive;
pub mod words;

pub use builtins::{Builtin, Builtins};
pub use interactive::{InteractiveApp, LoopControl};
