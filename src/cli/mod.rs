//! Command-line surface: global options and the demo commands.

pub mod args;
pub mod demo;

pub use args::GlobalArgs;
