//! The application object.
//!
//! An [`App`] owns the command registry, parses the global options, sets up
//! logging, and either dispatches one sub-command or runs the interactive
//! shell. All user-facing output goes through its stdout/stderr sinks so
//! tests can capture it.

use std::cell::{Cell, Ref, RefCell};
use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use tracing::{debug, info, warn};

use crate::cli::args::{self, GlobalArgs};
use crate::core::logging;
use crate::core::registry::CommandManager;
use crate::error::{Result, ShellError};
use crate::help::{ActionResult, HelpAction, HelpCommand};
use crate::render::error::{RenderOptions, render_error};
use crate::shell::InteractiveApp;
use crate::storage::ResolvedConfig;

/// A command-line application.
pub struct App {
    name: String,
    version: String,
    description: String,
    command_manager: CommandManager,
    config: RefCell<ResolvedConfig>,
    render_options: Cell<RenderOptions>,
    stdout: RefCell<Box<dyn Write>>,
    stderr: RefCell<Box<dyn Write>>,
}

impl App {
    /// Create an application writing to the process stdout/stderr.
    ///
    /// A `help` command is added to `command_manager`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        mut command_manager: CommandManager,
    ) -> Self {
        let name = name.into();
        command_manager.add_command("help", HelpCommand::factory());
        Self {
            config: RefCell::new(ResolvedConfig::defaults(&name)),
            name,
            version: version.into(),
            description: description.into(),
            command_manager,
            render_options: Cell::new(RenderOptions::default()),
            stdout: RefCell::new(Box::new(std::io::stdout())),
            stderr: RefCell::new(Box::new(std::io::stderr())),
        }
    }

    /// Redirect output, e.g. into a buffer under test.
    #[must_use]
    pub fn with_output(self, stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        Self {
            stdout: RefCell::new(stdout),
            stderr: RefCell::new(stderr),
            ..self
        }
    }

    /// Replace the resolved configuration.
    #[must_use]
    pub fn with_config(self, config: ResolvedConfig) -> Self {
        Self {
            config: RefCell::new(config),
            ..self
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn command_manager(&self) -> &CommandManager {
        &self.command_manager
    }

    /// The configuration in effect.
    pub fn config(&self) -> Ref<'_, ResolvedConfig> {
        self.config.borrow()
    }

    /// Write text to the application's stdout.
    pub fn write_out(&self, text: &str) -> Result<()> {
        let mut out = self.stdout.borrow_mut();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write text to the application's stderr.
    pub fn write_err(&self, text: &str) -> Result<()> {
        let mut err = self.stderr.borrow_mut();
        err.write_all(text.as_bytes())?;
        err.flush()?;
        Ok(())
    }

    /// The top-level parser: global options plus trailing command tokens.
    #[must_use]
    pub fn build_option_parser(&self) -> clap::Command {
        args::build_parser(&self.name, &self.version, &self.description)
    }

    /// Run with `argv` (program name excluded) and return the exit code.
    ///
    /// Failures are rendered to stderr.
    pub fn run(&self, argv: &[String]) -> i32 {
        match self.try_run(argv) {
            Ok(code) => code,
            Err(err) => {
                self.report_error(&err);
                err.exit_code().into()
            }
        }
    }

    /// Run with `argv`, propagating failures.
    ///
    /// With no command tokens the interactive shell reads from stdin.
    pub fn try_run(&self, argv: &[String]) -> Result<i32> {
        let mut parser = self.build_option_parser();
        let global = match args::parse_global(&parser, argv) {
            Ok(global) => global,
            Err(err) if is_display_request(&err) => {
                self.write_out(&err.render().to_string())?;
                return Ok(0);
            }
            Err(err) => return Err(usage_error(&self.name, &err)),
        };

        self.configure(&global)?;

        if global.help {
            let action = HelpAction::new(&self.command_manager);
            let result = {
                let mut out = self.stdout.borrow_mut();
                action.invoke(&mut parser, &mut **out)?
            };
            if let ActionResult::Exit(code) = result {
                return Ok(code);
            }
        }

        if global.command.is_empty() {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            return self.run_interactive(&mut input);
        }

        self.run_subcommand(&global.command)
    }

    /// Apply global options: error rendering, configuration, logging.
    fn configure(&self, global: &GlobalArgs) -> Result<()> {
        self.render_options.set(RenderOptions {
            json: global.json,
            debug: global.debug,
            no_color: global.no_color,
        });

        let config = ResolvedConfig::resolve(&self.name, global)?;
        logging::init(config.log_level, config.log_format, config.log_file.clone());
        debug!(
            config = %config.config_path.display(),
            level = config.log_level.as_filter(),
            level_source = %config.sources.log_level,
            "configuration resolved"
        );
        *self.config.borrow_mut() = config;
        Ok(())
    }

    /// Resolve `argv` to a command, parse its arguments, and run it.
    ///
    /// `--help` on the command itself prints its help and returns 0.
    pub fn run_subcommand(&self, argv: &[String]) -> Result<i32> {
        let (make, name, rest) = self.command_manager.find_command(argv)?;
        let mut cmd = make(&rest);
        let prog = format!("{} {}", self.name, name);
        let parser = cmd.parser(&prog);

        let matches =
            match parser.try_get_matches_from(std::iter::once(prog).chain(rest.iter().cloned())) {
                Ok(matches) => matches,
                Err(err) if is_display_request(&err) => {
                    self.write_out(&err.render().to_string())?;
                    return Ok(0);
                }
                Err(err) => return Err(usage_error(&name, &err)),
            };

        info!(command = %name, "running command");
        let code = cmd.run(self, &matches)?;
        debug!(command = %name, code, "command finished");
        Ok(code)
    }

    /// Run the interactive shell on `input` until it ends or the user quits.
    pub fn run_interactive(&self, input: &mut dyn BufRead) -> Result<i32> {
        info!(app = %self.name, "entering interactive mode");
        let mut shell = InteractiveApp::new(self, &self.command_manager);
        shell.cmdloop(input)?;
        Ok(0)
    }

    /// Log and render an error to stderr.
    pub fn report_error(&self, err: &ShellError) {
        debug!(code = err.error_code(), "{err}");
        let text = render_error(err, &self.name, self.render_options.get());
        if let Err(write_err) = self.write_err(&text) {
            warn!("failed to write error output: {write_err}");
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("command_manager", &self.command_manager)
            .finish_non_exhaustive()
    }
}

fn is_display_request(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

/// First line of a clap error, without its `error: ` prefix.
fn usage_error(command: &str, err: &clap::Error) -> ShellError {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    ShellError::Usage {
        command: command.to_string(),
        message: first.trim_start_matches("error: ").to_string(),
    }
}
