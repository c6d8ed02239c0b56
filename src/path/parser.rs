//! Path string parser.
//!
//! Grammar: a path is a sequence of atoms, each either a bare identifier
//! (a maximal run of characters other than `.`, `[` and `]`) or a bracket
//! expression holding a decimal index or a double-quoted key. Identifiers
//! after the first atom are introduced by exactly one `.`; brackets attach
//! directly to whatever precedes them.

use super::ast::{is_delimiter, Path, Segment};
use super::error::PathError;

/// Parser for path strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given path string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Parses the path string into a Path.
    pub fn parse(input: &'a str) -> Result<Path, PathError> {
        let mut parser = Parser::new(input);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Path, PathError> {
        let mut segments = Vec::new();

        while let Some(ch) = self.peek() {
            match ch {
                '[' => {
                    segments.push(self.parse_bracket_expression()?);
                    self.expect_boundary()?;
                }
                '.' if segments.is_empty() => return Err(PathError::LeadingDot),
                '.' => {
                    self.next();
                    let name = self.parse_identifier()?;
                    segments.push(Segment::Key(name));
                }
                ']' => {
                    return Err(PathError::UnmatchedBracket {
                        position: self.position,
                    })
                }
                _ if segments.is_empty() => {
                    let name = self.parse_identifier()?;
                    segments.push(Segment::Key(name));
                }
                // Identifiers are maximal and brackets check their boundary,
                // so a stray character here means two atoms are touching.
                other => return Err(self.unexpected(other, "'.' or '['")),
            }
        }

        Ok(Path::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn unexpected(&self, found: char, expected: &'static str) -> PathError {
        PathError::UnexpectedChar {
            position: self.position,
            found,
            expected,
        }
    }

    /// Consumes `expected`, described as `what` in errors.
    fn expect(&mut self, expected: char, what: &'static str) -> Result<(), PathError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.next();
                Ok(())
            }
            Some(ch) => Err(self.unexpected(ch, what)),
            None => Err(PathError::UnexpectedEnd { expected: what }),
        }
    }

    /// A closing bracket must be followed by `.`, `[` or the end of input.
    fn expect_boundary(&self) -> Result<(), PathError> {
        match self.peek() {
            None | Some('.') | Some('[') => Ok(()),
            Some(ch) => Err(self.unexpected(ch, "'.', '[' or end of path")),
        }
    }

    /// Parses a bare identifier (object key).
    fn parse_identifier(&mut self) -> Result<String, PathError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if is_delimiter(ch) {
                break;
            }
            self.next();
        }
        if self.position > start {
            return Ok(self.input[start..self.position].to_string());
        }
        match self.peek() {
            Some(ch) => Err(self.unexpected(ch, "identifier")),
            None => Err(PathError::UnexpectedEnd {
                expected: "identifier",
            }),
        }
    }

    /// Parses bracket expression: [index] or ["key"]
    fn parse_bracket_expression(&mut self) -> Result<Segment, PathError> {
        self.expect('[', "'['")?;

        let segment = match self.peek() {
            Some('"') => Segment::Key(self.parse_quoted_key()?),
            Some(ch) if ch.is_ascii_digit() => Segment::Index(self.parse_index()?),
            Some(ch) => return Err(self.unexpected(ch, "index or quoted key")),
            None => {
                return Err(PathError::UnexpectedEnd {
                    expected: "index or quoted key",
                })
            }
        };

        self.expect(']', "']'")?;
        Ok(segment)
    }

    /// Parses a double-quoted key. Only `\"` and `\\` are recognized escapes.
    fn parse_quoted_key(&mut self) -> Result<String, PathError> {
        self.expect('"', "'\"'")?;
        let mut value = String::new();
        loop {
            let backslash = self.position;
            match self.next() {
                Some('"') => return Ok(value),
                Some('\\') => match self.next() {
                    Some(ch @ ('"' | '\\')) => value.push(ch),
                    Some(found) => {
                        return Err(PathError::InvalidEscape {
                            position: backslash,
                            found,
                        })
                    }
                    None => {
                        return Err(PathError::UnexpectedEnd {
                            expected: "escaped character",
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(PathError::UnexpectedEnd {
                        expected: "closing quote '\"'",
                    })
                }
            }
        }
    }

    /// Parses a run of decimal digits.
    fn parse_index(&mut self) -> Result<usize, PathError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.next();
        }
        let digits = &self.input[start..self.position];
        digits.parse::<usize>().map_err(|_| PathError::IndexOutOfRange {
            position: start,
            digits: digits.to_string(),
        })
    }
}

/// Parses a path, returning `None` when the text is not a valid path.
pub fn parse_path(text: &str) -> Option<Path> {
    match Parser::parse(text) {
        Ok(path) => Some(path),
        Err(err) => {
            log::debug!("rejected path {:?}: {}", text, err);
            None
        }
    }
}

impl std::str::FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Segment {
        Segment::key(name)
    }

    #[test]
    fn test_parse_empty() {
        let path = Parser::parse("").unwrap();
        assert!(path.is_root());
    }

    #[test]
    fn test_parse_identifier() {
        let path = Parser::parse("a").unwrap();
        assert_eq!(path.segments, vec![key("a")]);
    }

    #[test]
    fn test_parse_mixed() {
        let path = Parser::parse(r#"a.b[0]["x"]"#).unwrap();
        assert_eq!(
            path.segments,
            vec![key("a"), key("b"), Segment::Index(0), key("x")]
        );
    }

    #[test]
    fn test_parse_escaped_key() {
        let path = Parser::parse(r#"a.b[0]["a\\\""].x"#).unwrap();
        assert_eq!(
            path.segments,
            vec![key("a"), key("b"), Segment::Index(0), key("a\\\""), key("x")]
        );
    }

    #[test]
    fn test_parse_leading_bracket() {
        assert_eq!(Parser::parse("[0]").unwrap().segments, vec![Segment::Index(0)]);
        assert_eq!(Parser::parse(r#"["b"]"#).unwrap().segments, vec![key("b")]);
    }

    #[test]
    fn test_parse_chained_brackets() {
        let path = Parser::parse(r#"[1][2]["k"].z"#).unwrap();
        assert_eq!(
            path.segments,
            vec![Segment::Index(1), Segment::Index(2), key("k"), key("z")]
        );
    }

    #[test]
    fn test_parse_identifier_allows_other_punctuation() {
        let path = Parser::parse("a-b.c d.\"q\".*").unwrap();
        assert_eq!(
            path.segments,
            vec![key("a-b"), key("c d"), key("\"q\""), key("*")]
        );
    }

    #[test]
    fn test_parse_non_ascii_identifier() {
        let path = Parser::parse("über[0].ключ").unwrap();
        assert_eq!(
            path.segments,
            vec![key("über"), Segment::Index(0), key("ключ")]
        );
    }

    #[test]
    fn test_parse_leading_dot_fails() {
        assert!(matches!(
            Parser::parse(".a"),
            Err(PathError::LeadingDot)
        ));
    }

    #[test]
    fn test_parse_trailing_dot_fails() {
        assert!(matches!(
            Parser::parse("a."),
            Err(PathError::UnexpectedEnd { .. })
        ));
        assert!(Parser::parse("a[0].").is_err());
    }

    #[test]
    fn test_parse_double_dot_fails() {
        assert!(Parser::parse("a..b").is_err());
    }

    #[test]
    fn test_parse_dot_before_bracket_fails() {
        assert!(Parser::parse("a.[0]").is_err());
    }

    #[test]
    fn test_parse_invalid_bracket_content_fails() {
        for text in ["[b]", "[true]", "[b\"]", "[[b]]", "[]", "[-1]", "[1a]"] {
            assert!(Parser::parse(text).is_err(), "{} should fail", text);
        }
    }

    #[test]
    fn test_parse_unterminated_fails() {
        assert!(Parser::parse("[b").is_err());
        assert!(Parser::parse("[0").is_err());
        assert!(matches!(
            Parser::parse(r#"["b]"#),
            Err(PathError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_parse_unknown_escape_fails() {
        assert_eq!(
            Parser::parse(r#"b["a\n"]"#),
            Err(PathError::InvalidEscape {
                position: 4,
                found: 'n',
            })
        );
    }

    #[test]
    fn test_parse_unmatched_close_fails() {
        assert_eq!(
            Parser::parse("b]"),
            Err(PathError::UnmatchedBracket { position: 1 })
        );
        assert_eq!(
            Parser::parse("]"),
            Err(PathError::UnmatchedBracket { position: 0 })
        );
    }

    #[test]
    fn test_parse_text_after_bracket_fails() {
        let err = Parser::parse("[1]a").unwrap_err();
        assert_eq!(
            err,
            PathError::UnexpectedChar {
                position: 3,
                found: 'a',
                expected: "'.', '[' or end of path",
            }
        );
    }

    #[test]
    fn test_parse_index_overflow_fails() {
        let err = Parser::parse("a[99999999999999999999999999]").unwrap_err();
        assert_eq!(
            err,
            PathError::IndexOutOfRange {
                position: 2,
                digits: "99999999999999999999999999".to_string(),
            }
        );
        assert_eq!(err.position(), Some(2));
        assert!(Parser::parse("[18446744073709551615]").is_ok());
    }

    #[test]
    fn test_parse_path_returns_none_on_failure() {
        assert_eq!(parse_path("a."), None);
        assert_eq!(parse_path("a"), Some(Path::new(vec![key("a")])));
    }

    #[test]
    fn test_from_str() {
        let path: Path = "x[3]".parse().unwrap();
        assert_eq!(path.segments, vec![key("x"), Segment::Index(3)]);
    }
}
