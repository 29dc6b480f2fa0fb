//! Error rendering for cmdshell.
//!
//! Human output is a short header, an optional cause chain (`--debug`) and
//! the first fix suggestion. `--json` switches to a structured object for
//! scripts.

use colored::Colorize;

use crate::error::{FixSuggestion, ShellError};
use crate::util::env::should_use_color;

/// How to render errors; set from the global options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit JSON instead of text.
    pub json: bool,
    /// Include the error's source chain.
    pub debug: bool,
    /// Never colorize, even on a TTY.
    pub no_color: bool,
}

// =============================================================================
// Public API
// =============================================================================

/// Render an error for display on stderr. Always ends with a newline.
#[must_use]
pub fn render_error(error: &ShellError, app_name: &str, options: RenderOptions) -> String {
    if options.json {
        return render_error_json(error, app_name);
    }
    let color = should_use_color(options.no_color);
    render_text(error, app_name, options.debug, color)
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &ShellError, app_name: &str) -> String {
    let error_json = ErrorJson::from_error(error, app_name);
    match serde_json::to_string(&error_json) {
        Ok(json) => format!("{json}\n"),
        Err(_) => render_text(error, app_name, false, false),
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

fn render_text(error: &ShellError, app_name: &str, debug: bool, color: bool) -> String {
    let mut lines = Vec::new();

    let header = format!("Error [{}]: {}", error.error_code(), error);
    lines.push(if color {
        header.red().bold().to_string()
    } else {
        header
    });

    if debug {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            lines.push(format!("  caused by: {cause}"));
            source = cause.source();
        }
    }

    let suggestions = error.fix_suggestions(app_name);
    if let Some(suggestion) = suggestions.first() {
        push_suggestion(&mut lines, suggestion, color);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_suggestion(lines: &mut Vec<String>, suggestion: &FixSuggestion, color: bool) {
    if !suggestion.context.is_empty() {
        lines.push(suggestion.context.clone());
    }
    if let Some(cmd) = suggestion.commands.first() {
        let fix = format!("Fix: {cmd}");
        lines.push(if color { fix.cyan().to_string() } else { fix });
    }
    if let Some(prevention) = &suggestion.prevention {
        lines.push(format!("Tip: {prevention}"));
    }
}

// =============================================================================
// JSON Rendering
// =============================================================================

/// JSON representation of an error for machine consumption.
#[derive(serde::Serialize)]
struct ErrorJson {
    error_code: String,
    category: String,
    message: String,
    exit_code: i32,
    suggestions: Vec<SuggestionJson>,
}

#[derive(serde::Serialize)]
struct SuggestionJson {
    commands: Vec<String>,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &ShellError, app_name: &str) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            category: error.category().to_string(),
            message: error.to_string(),
            exit_code: error.exit_code().into(),
            suggestions: error
                .fix_suggestions(app_name)
                .into_iter()
                .map(|s| SuggestionJson {
                    commands: s.commands,
                    context: s.context,
                    prevention: s.prevention,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> ShellError {
        ShellError::CommandNotFound {
            name: "ecoh".to_string(),
            similar: vec!["echo".to_string()],
        }
    }

    #[test]
    fn text_has_code_message_and_fix() {
        let text = render_text(&not_found(), "demo", false, false);
        assert!(text.starts_with("Error [SHELL-M001]: unknown command \"ecoh\"\n"));
        assert!(text.contains("Did you mean: echo?"));
        assert!(text.contains("Fix: demo echo"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn debug_adds_cause_chain() {
        let io = std::io::Error::other("disk on fire");
        let err: ShellError = anyhow::Error::new(io).context("saving history").into();
        let text = render_text(&err, "demo", true, false);
        assert!(text.contains("Error [SHELL-X099]: saving history"));
        assert!(text.contains("caused by: disk on fire"), "{text}");
    }

    #[test]
    fn json_is_parseable() {
        let json = render_error_json(&not_found(), "demo");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error_code"], "SHELL-M001");
        assert_eq!(value["category"], "Command error");
        assert_eq!(value["exit_code"], 2);
        assert_eq!(value["suggestions"][0]["commands"][0], "demo echo");
    }

    #[test]
    fn no_color_option_is_plain() {
        let options = RenderOptions {
            no_color: true,
            ..RenderOptions::default()
        };
        let text = render_error(&not_found(), "demo", options);
        assert!(!text.contains('\x1b'));
    }
}
