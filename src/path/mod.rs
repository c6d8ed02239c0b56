//! Path language: parsing and matching.
//!
//! Paths address a location inside a tree value. They are written with
//! dotted identifiers and bracketed indices or quoted keys, and parse into
//! a sequence of [`Segment`]s.
//!
//! # Supported Syntax
//!
//! - `name` - Object key as a bare identifier
//! - `.name` - Following object key
//! - `[0]` - Array index (decimal digits only)
//! - `["key"]` - Quoted object key (`\"` and `\\` escapes)
//! - `*` - Wildcard segment, meaningful only in patterns
//!
//! # Examples
//!
//! ```
//! use treepath::path::{match_path, parse_path, Segment};
//!
//! let path = parse_path(r#"a.b[0]["x"]"#).unwrap();
//! assert_eq!(path.segments[2], Segment::Index(0));
//!
//! let pattern = parse_path("a.*[0].x").unwrap();
//! assert!(match_path(path.as_slice(), pattern.as_slice()));
//! assert!(parse_path("a.").is_none());
//! ```

pub mod ast;
pub mod error;
pub mod matcher;
pub mod parser;

pub use ast::{Path, Segment};
pub use error::PathError;
pub use matcher::{match_key, match_path, match_segment};
pub use parser::{parse_path, Parser};
