//! Global option definitions using clap.
//!
//! Every application built on [`crate::core::app::App`] shares these
//! options. Everything after the first positional token belongs to the
//! sub-command and is handed to the command registry untouched.

use std::path::PathBuf;

use clap::{ArgAction, Args, FromArgMatches};

/// Options accepted before the sub-command name.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Increase verbosity of output. Can be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Specify a file to log output. Disabled by default.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Show the full error chain on failure.
    #[arg(long)]
    pub debug: bool,

    /// Render errors as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored error output
    #[arg(long)]
    pub no_color: bool,

    /// Read configuration from PATH instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show this help message and the list of commands, then exit
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Command to run, followed by its arguments. Starts the interactive
    /// shell when omitted.
    #[arg(
        value_name = "COMMAND",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Build the top-level parser for an application.
///
/// The stock `-h/--help` flag is disabled so the registry-aware help
/// action can take its place.
#[must_use]
pub fn build_parser(name: &str, version: &str, description: &str) -> clap::Command {
    let cmd = clap::Command::new(name.to_string())
        .version(version.to_string())
        .about(description.to_string())
        .disable_help_flag(true)
        .disable_help_subcommand(true);
    GlobalArgs::augment_args(cmd)
}

/// Parse `argv` (without the program name) against `parser`.
pub fn parse_global(
    parser: &clap::Command,
    argv: &[String],
) -> Result<GlobalArgs, clap::Error> {
    let matches = parser
        .clone()
        .try_get_matches_from(std::iter::once(parser.get_name().to_string()).chain(argv.iter().cloned()))?;
    GlobalArgs::from_arg_matches(&matches)
}
