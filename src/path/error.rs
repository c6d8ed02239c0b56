//! Why a path string was rejected.

use std::fmt;

/// A path parse failure. Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// `found` sits where `expected` should be.
    UnexpectedChar {
        position: usize,
        found: char,
        expected: &'static str,
    },
    /// The input stopped while `expected` was still owed.
    UnexpectedEnd { expected: &'static str },
    /// The path opens with `.`, so the first key is missing.
    LeadingDot,
    /// A `]` that closes no `[`.
    UnmatchedBracket { position: usize },
    /// A `\` in a quoted key followed by something other than `"` or `\`.
    InvalidEscape { position: usize, found: char },
    /// Bracket digits that do not fit an index.
    IndexOutOfRange { position: usize, digits: String },
}

impl PathError {
    /// Byte offset the error points at, when there is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            PathError::UnexpectedChar { position, .. }
            | PathError::UnmatchedBracket { position }
            | PathError::InvalidEscape { position, .. }
            | PathError::IndexOutOfRange { position, .. } => Some(*position),
            PathError::LeadingDot => Some(0),
            PathError::UnexpectedEnd { .. } => None,
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnexpectedChar {
                position,
                found,
                expected,
            } => write!(
                f,
                "Expected {} at position {}, found '{}'",
                expected, position, found
            ),
            PathError::UnexpectedEnd { expected } => {
                write!(f, "Expected {}, found end of path", expected)
            }
            PathError::LeadingDot => write!(f, "Path cannot start with '.'"),
            PathError::UnmatchedBracket { position } => {
                write!(f, "Unmatched ']' at position {}", position)
            }
            PathError::InvalidEscape { position, found } => write!(
                f,
                "Invalid escape '\\{}' at position {}, only \\\" and \\\\ are allowed",
                found, position
            ),
            PathError::IndexOutOfRange { position, digits } => {
                write!(f, "Index {} at position {} is too large", digits, position)
            }
        }
    }
}

impl std::error::Error for PathError {}
