//! treepath - a small path language for untyped tree values.
//!
//! Paths such as `a.b[0]["x"]` parse into [`path::Segment`]s, which then
//! drive reads, immutable writes, pattern-based stripping and merging of
//! [`document::Value`] trees. A `$name` / `$(name)` template expander
//! rounds out the toolkit.
//!
//! ```
//! use treepath::document::Value;
//! use treepath::path::parse_path;
//! use treepath::tree::{get_path, set_path};
//!
//! let path = parse_path("server.ports[0]").unwrap();
//! let config = set_path(None, path.as_slice(), Value::from(8080i64), true);
//! assert_eq!(get_path(&config, path.as_slice()), Some(&Value::from(8080i64)));
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod path;
pub mod template;
pub mod tree;
