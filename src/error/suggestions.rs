//! Fix suggestion database for cmdshell errors.
//!
//! Provides actionable fix suggestions mapped to specific error types,
//! including commands, context explanations, and prevention tips.

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// A fix suggestion for an error.
///
/// Contains actionable information to help users resolve errors.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Primary fix commands in order of preference.
    /// These should be copy-paste ready for the terminal.
    pub commands: Vec<String>,

    /// Explanation of why this error occurred.
    pub context: String,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with required fields.
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
        }
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }
}

// =============================================================================
// Name Similarity
// =============================================================================

/// Maximum edit distance for a registered name to count as "similar".
const MAX_SIMILAR_DISTANCE: usize = 2;

/// Levenshtein distance between two strings, by `char`.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Pick registered names that look like a typo of `wanted`.
///
/// Returns names within [`MAX_SIMILAR_DISTANCE`] edits, or that share
/// `wanted` as a prefix, closest first.
#[must_use]
pub fn similar_names<'a, I>(wanted: &str, names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(usize, &str)> = names
        .into_iter()
        .filter_map(|name| {
            let distance = edit_distance(wanted, name);
            if distance <= MAX_SIMILAR_DISTANCE || (!wanted.is_empty() && name.starts_with(wanted))
            {
                Some((distance, name))
            } else {
                None
            }
        })
        .collect();
    scored.sort_unstable();
    scored.into_iter().map(|(_, name)| name.to_string()).collect()
}

// =============================================================================
// Command Suggestions
// =============================================================================

/// Generates fix suggestions for unknown commands.
#[must_use]
pub fn command_not_found_suggestions(
    app_name: &str,
    name: &str,
    similar: &[String],
) -> Vec<FixSuggestion> {
    let mut commands: Vec<String> = similar
        .iter()
        .map(|candidate| format!("{app_name} {candidate}"))
        .collect();
    commands.push(format!("{app_name} --help"));

    let context = if similar.is_empty() {
        format!("'{name}' is not a registered command.")
    } else {
        format!(
            "'{name}' is not a registered command. Did you mean: {}?",
            similar.join(", ")
        )
    };

    vec![FixSuggestion::new(commands, context)]
}

/// Generates fix suggestions for ambiguous command prefixes.
#[must_use]
pub fn ambiguous_command_suggestions(
    app_name: &str,
    name: &str,
    candidates: &[String],
) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        candidates
            .iter()
            .map(|candidate| format!("{app_name} {candidate}"))
            .collect(),
        format!("'{name}' is a prefix of more than one command."),
    )
    .with_prevention("Type enough of the command name to make it unique.")]
}

/// Generates fix suggestions for option tokens in command position.
#[must_use]
pub fn invalid_command_suggestions(app_name: &str, token: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("{app_name} --help")],
        format!(
            "'{token}' looks like an option, but a command name was expected. \
             Global options go before the command, command options after it."
        ),
    )]
}

/// Generates fix suggestions for lines that could not be tokenized.
#[must_use]
pub fn malformed_line_suggestions(reason: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        Vec::new(),
        format!("The line could not be split into words: {reason}."),
    )
    .with_prevention(
        "Close every quote you open. Escape a literal quote with a backslash or \
         wrap it in the other kind of quote.",
    )]
}

// =============================================================================
// Configuration Suggestions
// =============================================================================

/// Generates fix suggestions for a missing config file.
#[must_use]
pub fn config_not_found_suggestions(path: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("touch {path}")],
        format!("Configuration file not found at {path}. It was requested explicitly."),
    )]
}

/// Generates fix suggestions for config parse errors.
#[must_use]
pub fn config_parse_suggestions(path: &str, message: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("$EDITOR {path}")],
            format!("The config file has a syntax error. The TOML parser reported: {message}"),
        )
        .with_prevention("Consider using a TOML-aware editor with syntax highlighting."),
    ]
}

/// Generates fix suggestions for invalid config values.
#[must_use]
pub fn config_invalid_suggestions(key: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        Vec::new(),
        format!("The value for '{key}' is invalid: {message}"),
    )]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_suggestion_builder() {
        let suggestion =
            FixSuggestion::new(vec!["cmd1".to_string()], "Test context").with_prevention("Tip");

        assert_eq!(suggestion.commands, vec!["cmd1"]);
        assert_eq!(suggestion.context, "Test context");
        assert_eq!(suggestion.prevention, Some("Tip".to_string()));
    }

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("echo", "echo"), 0);
        assert_eq!(edit_distance("ecoh", "echo"), 2);
        assert_eq!(edit_distance("sum", "sun"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn similar_names_orders_by_distance() {
        let names = ["echo", "sum", "show config", "help"];
        let similar = similar_names("sun", names);
        assert_eq!(similar.first().map(String::as_str), Some("sum"));
        assert!(!similar.iter().any(|n| n == "show config"));
    }

    #[test]
    fn similar_names_includes_prefix_matches() {
        let similar = similar_names("show", ["show config", "echo"]);
        assert_eq!(similar, vec!["show config".to_string()]);
    }

    #[test]
    fn not_found_mentions_candidates() {
        let suggestions = command_not_found_suggestions("demo", "ecoh", &["echo".to_string()]);
        assert!(suggestions[0].context.contains("Did you mean: echo?"));
        assert_eq!(suggestions[0].commands[0], "demo echo");
        assert_eq!(suggestions[0].commands.last().unwrap(), "demo --help");
    }

    #[test]
    fn not_found_without_candidates() {
        let suggestions = command_not_found_suggestions("demo", "zzz", &[]);
        assert_eq!(suggestions[0].commands, vec!["demo --help".to_string()]);
        assert!(!suggestions[0].context.contains("Did you mean"));
    }
}
