//! Segment and path types produced by the path parser.

use std::fmt;

/// A single step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Array index (`[0]`), also usable as a stringified object key
    Index(usize),
    /// Object key (`name` or `["name"]`)
    Key(String),
}

impl Segment {
    /// The token that matches any single segment in a pattern.
    pub const WILDCARD: &'static str = "*";

    /// Creates a key segment.
    pub fn key(name: impl Into<String>) -> Self {
        Segment::Key(name.into())
    }

    /// Creates the wildcard segment `*`.
    pub fn wildcard() -> Self {
        Segment::Key(Self::WILDCARD.to_string())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Key(k) if k == Self::WILDCARD)
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Returns the array index this segment addresses.
    ///
    /// Key segments count only when they are canonical decimal integers
    /// (`"2"`, not `"02"` or `"+2"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) => {
                let canonical = !k.is_empty()
                    && k.bytes().all(|b| b.is_ascii_digit())
                    && (k == "0" || !k.starts_with('0'));
                if canonical {
                    k.parse().ok()
                } else {
                    None
                }
            }
        }
    }

    /// Returns the key this segment addresses in an object.
    pub fn as_key(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Segment::Index(i) => std::borrow::Cow::Owned(i.to_string()),
            Segment::Key(k) => std::borrow::Cow::Borrowed(k),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "{}", i),
            Segment::Key(k) => write!(f, "{}", k),
        }
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

/// A parsed path. An empty path addresses the root value itself.
///
/// Patterns share this type; their key segments may be the wildcard `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    /// Segments that make up the path.
    pub segments: Vec<Segment>,
}

impl Path {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl AsRef<[Segment]> for Path {
    fn as_ref(&self) -> &[Segment] {
        &self.segments
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Renders the canonical text form, which parses back to the same path.
///
/// Keys are written bare when they are non-empty and free of `.`, `[` and
/// `]`; anything else is quoted in brackets.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Key(key) if is_bare_identifier(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Segment::Key(key) => {
                    f.write_str("[\"")?;
                    for ch in key.chars() {
                        if ch == '"' || ch == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", ch)?;
                    }
                    f.write_str("\"]")?;
                }
            }
        }
        Ok(())
    }
}

/// Characters that end a bare identifier.
pub(crate) fn is_delimiter(ch: char) -> bool {
    matches!(ch, '.' | '[' | ']')
}

fn is_bare_identifier(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(is_delimiter)
}
