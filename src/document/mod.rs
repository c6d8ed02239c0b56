//! Tree value model shared by every path operation.

pub mod value;

pub use value::{Number, Value};
