//! Shell-word splitting for interactive input lines.
//!
//! POSIX-style rules:
//! - Unquoted whitespace separates words.
//! - Single quotes preserve everything literally.
//! - Inside double quotes a backslash only escapes `"`, `\`, `$`, `` ` `` or a
//!   newline; before anything else it is kept.
//! - Outside quotes a backslash escapes the next character.
//!
//! Quotes may appear mid-word (`a'b c'd` is one word) and an empty quoted
//! string (`''`) is a word of its own.

use crate::error::{Result, ShellError};

/// Split `line` into words.
///
/// # Errors
///
/// Returns [`ShellError::MalformedLine`] when a quote is left open or the
/// line ends with an unescaped backslash.
pub fn split(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    // True once the current word has started, even if it is still empty.
    let mut in_word = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            match ch {
                '"' => in_double = false,
                '\\' => match chars.peek() {
                    Some(&next) if matches!(next, '"' | '\\' | '$' | '`' | '\n') => {
                        chars.next();
                        current.push(next);
                    }
                    _ => current.push('\\'),
                },
                _ => current.push(ch),
            }
        } else {
            match ch {
                '\'' => {
                    in_single = true;
                    in_word = true;
                }
                '"' => {
                    in_double = true;
                    in_word = true;
                }
                '\\' => {
                    let Some(next) = chars.next() else {
                        return Err(malformed("No escaped character"));
                    };
                    current.push(next);
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                _ => {
                    current.push(ch);
                    in_word = true;
                }
            }
        }
    }

    if in_single || in_double {
        return Err(malformed("No closing quotation"));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

fn malformed(reason: &str) -> ShellError {
    ShellError::MalformedLine {
        reason: reason.to_string(),
    }
}
