//! Template expansion.
//!
//! Placeholders in a template name values to be substituted:
//!
//! - `$name` - a run of ASCII letters, digits and `_`
//! - `$(any text)` - everything up to the first unescaped `)`, where `$$`
//!   stands for `$` and `$)` for `)`
//! - `$$` - a literal `$`
//!
//! Names are handed to a caller-supplied resolver and its result is
//! inserted verbatim. Anything that does not form a placeholder, including
//! a `$(` that is never closed, passes through untouched.
//!
//! # Examples
//!
//! ```
//! use treepath::template::apply_template;
//!
//! let text = apply_template("$greeting, $(first name)! Cost: $$5", |name| match name {
//!     "greeting" => "Hello".to_string(),
//!     "first name" => "Ada".to_string(),
//!     _ => String::new(),
//! });
//! assert_eq!(text, "Hello, Ada! Cost: $5");
//! ```

use crate::document::Value;
use crate::path::parse_path;
use crate::tree::get_path;
use std::collections::HashMap;

/// Scanner state. Offsets are byte positions into the template.
#[derive(Debug)]
enum State {
    /// Copying text through.
    Literal,
    /// Just consumed a `$` at `dollar`.
    AfterDollar { dollar: usize },
    /// Inside `$name`, whose first character is at `start`.
    BareName { start: usize },
    /// Inside `$(...)` opened by the `$` at `dollar`. `escape` is set after
    /// a `$` that may start a `$$` or `$)` escape.
    BracketName {
        dollar: usize,
        name: String,
        escape: bool,
    },
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Expands every placeholder in `text` using `resolve`.
pub fn apply_template<F>(text: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = String::with_capacity(text.len());
    let mut state = State::Literal;

    for (pos, ch) in text.char_indices() {
        state = match state {
            State::Literal if ch == '$' => State::AfterDollar { dollar: pos },
            State::Literal => {
                output.push(ch);
                State::Literal
            }
            State::AfterDollar { dollar } => match ch {
                '$' => {
                    output.push('$');
                    State::Literal
                }
                '(' => State::BracketName {
                    dollar,
                    name: String::new(),
                    escape: false,
                },
                c if is_name_char(c) => State::BareName { start: pos },
                c => {
                    output.push('$');
                    output.push(c);
                    State::Literal
                }
            },
            State::BareName { start } if is_name_char(ch) => State::BareName { start },
            State::BareName { start } => {
                output.push_str(&resolve(&text[start..pos]));
                if ch == '$' {
                    State::AfterDollar { dollar: pos }
                } else {
                    output.push(ch);
                    State::Literal
                }
            }
            State::BracketName {
                dollar,
                mut name,
                escape,
            } => match (escape, ch) {
                (false, '$') => State::BracketName {
                    dollar,
                    name,
                    escape: true,
                },
                (false, ')') => {
                    output.push_str(&resolve(&name));
                    State::Literal
                }
                (true, '$' | ')') => {
                    name.push(ch);
                    State::BracketName {
                        dollar,
                        name,
                        escape: false,
                    }
                }
                (escape, c) => {
                    if escape {
                        name.push('$');
                    }
                    name.push(c);
                    State::BracketName {
                        dollar,
                        name,
                        escape: false,
                    }
                }
            },
        };
    }

    match state {
        State::Literal => {}
        State::AfterDollar { .. } => output.push('$'),
        State::BareName { start } => output.push_str(&resolve(&text[start..])),
        State::BracketName { dollar, .. } => {
            log::debug!("unterminated placeholder at byte {} left as text", dollar);
            output.push_str(&text[dollar..]);
        }
    }

    output
}

/// Resolves template names from explicit variables, then as paths into a
/// document. Names found in neither expand to nothing.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    pub vars: &'a HashMap<String, String>,
    pub document: Option<&'a Value>,
}

impl<'a> Bindings<'a> {
    pub fn new(vars: &'a HashMap<String, String>, document: Option<&'a Value>) -> Self {
        Self { vars, document }
    }

    /// The text `name` stands for, if any.
    pub fn lookup(&self, name: &str) -> Option<String> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        let document = self.document?;
        let path = parse_path(name)?;
        get_path(document, path.as_slice()).map(Value::to_string)
    }

    pub fn expand(&self, text: &str) -> String {
        apply_template(text, |name| {
            self.lookup(name).unwrap_or_else(|| {
                log::warn!("no value for template name {:?}", name);
                String::new()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn replacements() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("a", "A"),
            ("b", "B"),
            ("LONG_VAR", "long"),
            ("\"", "C"),
            (")$)", "D"),
        ])
    }

    /// Expands `text` and returns the output with every name looked up.
    fn expand(text: &str) -> (String, Vec<String>) {
        let table = replacements();
        let mut calls = Vec::new();
        let output = apply_template(text, |name| {
            calls.push(name.to_string());
            table.get(name).map(|s| s.to_string()).unwrap_or_default()
        });
        (output, calls)
    }

    fn no_resolve(name: &str) -> String {
        panic!("resolver called with {:?}", name)
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(apply_template("abc", no_resolve), "abc");
        assert_eq!(apply_template("", no_resolve), "");
    }

    #[test]
    fn test_incomplete_placeholders_untouched() {
        assert_eq!(apply_template("$(abc", no_resolve), "$(abc");
        assert_eq!(apply_template("$\\", no_resolve), "$\\");
        assert_eq!(apply_template("abc$", no_resolve), "abc$");
        assert_eq!(apply_template("$ x", no_resolve), "$ x");
        assert_eq!(apply_template("x$($$y", no_resolve), "x$($$y");
    }

    #[test]
    fn test_double_dollar() {
        assert_eq!(expand("a$$b"), ("a$b".to_string(), vec![]));
        assert_eq!(expand("$$"), ("$".to_string(), vec![]));
        assert_eq!(expand("$$x$$"), ("$x$".to_string(), vec![]));
    }

    #[test]
    fn test_bare_names() {
        assert_eq!(expand("$a").0, "A");
        assert_eq!(expand("x$LONG_VAR z").0, "xlong z");
        let (output, calls) = expand("$a.$b.$a");
        assert_eq!(output, "A.B.A");
        assert_eq!(calls, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_adjacent_bare_names() {
        assert_eq!(expand("$a$b").0, "AB");
        assert_eq!(expand("$a$$").0, "A$");
    }

    #[test]
    fn test_bracket_names() {
        assert_eq!(expand("$(a)").0, "A");
        assert_eq!(expand("x$(LONG_VAR) z").0, "xlong z");
        assert_eq!(expand("$(a).$(b).$(a)").0, "A.B.A");
        assert_eq!(expand("\"$(\")\"").0, "\"C\"");
    }

    #[test]
    fn test_bracket_escapes() {
        let (output, calls) = expand("\"$($)$$$))\"");
        assert_eq!(output, "\"D\"");
        assert_eq!(calls, vec![")$)"]);
    }

    #[test]
    fn test_lone_dollar_inside_brackets_is_literal() {
        let (_, calls) = expand("$(a$b)");
        assert_eq!(calls, vec!["a$b"]);
    }

    #[test]
    fn test_results_not_reexpanded() {
        let output = apply_template("$a", |_| "$b".to_string());
        assert_eq!(output, "$b");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(expand("ü$aé").0, "üAé");
        assert_eq!(expand("$(ключ").0, "$(ключ");
    }
}
