//! Commands of the `cmdshell` binary.
//!
//! A small set that exercises the framework end to end: a plain command,
//! one with typed arguments, and a two-word command.

use clap::{Arg, ArgAction, ArgMatches, value_parser};
use serde::Serialize;

use crate::core::app::App;
use crate::core::command::{Command, factory};
use crate::core::registry::CommandManager;
use crate::error::{Result, ShellError};

/// Application name, also the prefix of its environment variables.
pub const APP_NAME: &str = "cmdshell";

/// Build the demo application with its commands registered.
#[must_use]
pub fn build_app() -> App {
    let mut manager = CommandManager::new(APP_NAME);
    manager.add_command("echo", factory(|_| Box::new(EchoCommand)));
    manager.add_command("sum", factory(|_| Box::new(SumCommand)));
    manager.add_command("show config", factory(|_| Box::new(ShowConfigCommand)));
    App::new(
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        "Run a command, or start an interactive shell when none is given.",
        manager,
    )
}

// =============================================================================
// echo
// =============================================================================

/// `echo [-n] WORD...`
pub struct EchoCommand;

impl Command for EchoCommand {
    fn description(&self) -> &str {
        "print the arguments, separated by spaces"
    }

    fn parser(&self, prog_name: &str) -> clap::Command {
        clap::Command::new(prog_name.to_string())
            .about(self.description().to_string())
            .arg(
                Arg::new("no_newline")
                    .short('n')
                    .action(ArgAction::SetTrue)
                    .help("do not print the trailing newline"),
            )
            .arg(
                Arg::new("words")
                    .value_name("WORD")
                    .action(ArgAction::Append)
                    .num_args(0..)
                    .help("text to print"),
            )
    }

    fn take_action(&mut self, app: &App, matches: &ArgMatches) -> Result<i32> {
        let words: Vec<&str> = matches
            .get_many::<String>("words")
            .map(|values| values.map(String::as_str).collect())
            .unwrap_or_default();
        let mut text = words.join(" ");
        if !matches.get_flag("no_newline") {
            text.push('\n');
        }
        app.write_out(&text)?;
        Ok(0)
    }
}

// =============================================================================
// sum
// =============================================================================

/// `sum NUMBER...`
pub struct SumCommand;

impl Command for SumCommand {
    fn description(&self) -> &str {
        "add integers and print the total"
    }

    fn parser(&self, prog_name: &str) -> clap::Command {
        clap::Command::new(prog_name.to_string())
            .about(self.description().to_string())
            .allow_negative_numbers(true)
            .arg(
                Arg::new("numbers")
                    .value_name("NUMBER")
                    .action(ArgAction::Append)
                    .num_args(1..)
                    .required(true)
                    .value_parser(value_parser!(i64))
                    .help("integers to add"),
            )
    }

    fn take_action(&mut self, app: &App, matches: &ArgMatches) -> Result<i32> {
        let mut total: i64 = 0;
        for value in matches.get_many::<i64>("numbers").into_iter().flatten() {
            total = total
                .checked_add(*value)
                .ok_or_else(|| anyhow::anyhow!("sum overflows a 64-bit integer"))?;
        }
        app.write_out(&format!("{total}\n"))?;
        Ok(0)
    }
}

// =============================================================================
// show config
// =============================================================================

/// `show config [--json]`
pub struct ShowConfigCommand;

#[derive(Serialize)]
struct ConfigReport {
    config_file: String,
    config_file_exists: bool,
    prompt: String,
    prompt_source: String,
    history_size: usize,
    log_level: &'static str,
    log_level_source: String,
    log_format: &'static str,
    log_file: Option<String>,
    log_file_source: String,
}

impl Command for ShowConfigCommand {
    fn description(&self) -> &str {
        "show the configuration in effect and where each value came from"
    }

    fn parser(&self, prog_name: &str) -> clap::Command {
        clap::Command::new(prog_name.to_string())
            .about(self.description().to_string())
            .arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("print as JSON"),
            )
    }

    fn take_action(&mut self, app: &App, matches: &ArgMatches) -> Result<i32> {
        let report = {
            let config = app.config();
            ConfigReport {
                config_file: config.config_path.display().to_string(),
                config_file_exists: config.config_path.exists(),
                prompt: config.prompt.clone(),
                prompt_source: config.sources.prompt.to_string(),
                history_size: config.history_size,
                log_level: config.log_level.as_filter(),
                log_level_source: config.sources.log_level.to_string(),
                log_format: config.log_format.as_str(),
                log_file: config.log_file.as_ref().map(|p| p.display().to_string()),
                log_file_source: config.sources.log_file.to_string(),
            }
        };

        let text = if matches.get_flag("json") {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| ShellError::Other(e.into()))?;
            format!("{json}\n")
        } else {
            render_report(&report)
        };
        app.write_out(&text)?;
        Ok(0)
    }
}

fn render_report(report: &ConfigReport) -> String {
    let existence = if report.config_file_exists {
        "found"
    } else {
        "not found"
    };
    let log_file = report.log_file.as_deref().unwrap_or("-");
    let mut out = String::new();
    out.push_str(&format!("config file:   {} ({existence})\n", report.config_file));
    out.push_str(&format!(
        "prompt:        {:?} ({})\n",
        report.prompt, report.prompt_source
    ));
    out.push_str(&format!("history size:  {}\n", report.history_size));
    out.push_str(&format!(
        "log level:     {} ({})\n",
        report.log_level, report.log_level_source
    ));
    out.push_str(&format!("log format:    {}\n", report.log_format));
    out.push_str(&format!(
        "log file:      {log_file} ({})\n",
        report.log_file_source
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ResolvedConfig;
    use crate::test_utils::SharedBuffer;

    fn demo_app(out: &SharedBuffer, err: &SharedBuffer) -> App {
        build_app()
            .with_output(Box::new(out.clone()), Box::new(err.clone()))
            .with_config(ResolvedConfig::defaults(APP_NAME))
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn registers_demo_commands() {
        let app = build_app();
        assert_eq!(
            app.command_manager().names(),
            vec!["echo", "help", "show config", "sum"]
        );
    }

    #[test]
    fn echo_joins_words() {
        let (out, err) = (SharedBuffer::new(), SharedBuffer::new());
        let app = demo_app(&out, &err);
        app.run_subcommand(&argv(&["echo", "hello", "world"])).unwrap();
        app.run_subcommand(&argv(&["echo", "-n", "again"])).unwrap();
        assert_eq!(out.contents(), "hello world\nagain");
    }

    #[test]
    fn sum_adds_negative_numbers() {
        let (out, err) = (SharedBuffer::new(), SharedBuffer::new());
        let app = demo_app(&out, &err);
        app.run_subcommand(&argv(&["sum", "40", "5", "-3"])).unwrap();
        assert_eq!(out.contents(), "42\n");
    }

    #[test]
    fn sum_rejects_non_numbers() {
        let (out, err) = (SharedBuffer::new(), SharedBuffer::new());
        let app = demo_app(&out, &err);
        let error = app.run_subcommand(&argv(&["sum", "1", "two"])).unwrap_err();
        assert!(matches!(error, ShellError::Usage { ref command, .. } if command == "sum"));
    }

    #[test]
    fn sum_overflow_is_internal_error() {
        let (out, err) = (SharedBuffer::new(), SharedBuffer::new());
        let app = demo_app(&out, &err);
        let max = i64::MAX.to_string();
        let error = app.run_subcommand(&argv(&["sum", &max, "1"])).unwrap_err();
        assert_eq!(error.to_string(), "sum overflows a 64-bit integer");
    }

    #[test]
    fn show_config_reports_defaults() {
        let (out, err) = (SharedBuffer::new(), SharedBuffer::new());
        let app = demo_app(&out, &err);
        app.run_subcommand(&argv(&["show", "config"])).unwrap();
        let text = out.contents();
        assert!(text.contains("prompt:        \"(cmdshell) \" (default)"), "{text}");
        assert!(text.contains("history size:  100"));
        assert!(text.contains("log level:     warn (default)"));
    }

    #[test]
    fn show_config_as_json() {
        let (out, err) = (SharedBuffer::new(), SharedBuffer::new());
        let app = demo_app(&out, &err);
        app.run_subcommand(&argv(&["show", "config", "--json"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(value["history_size"], 100);
        assert_eq!(value["log_format"], "human");
        assert!(value["log_file"].is_null());
    }
}
