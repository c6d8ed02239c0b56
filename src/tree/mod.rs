//! Segment-driven operations on tree values.
//!
//! Reads borrow the tree. Writers, strip and merge take their input by value
//! and hand back a new tree, moving untouched branches across instead of
//! copying them.

pub mod accessor;
pub mod merger;
pub mod pruner;

pub use accessor::{get_path, set_path, MAX_ARRAY_PADDING};
pub use merger::{merge, merge_at};
pub use pruner::strip_matching_elements;
