//! Reading and writing values at a path.

use crate::document::Value;
use crate::path::Segment;
use indexmap::IndexMap;

/// Most `Null` slots `set_path` will add to reach an index.
pub const MAX_ARRAY_PADDING: usize = 1 << 16;

/// Returns the value at `path`, or `None` when the path does not resolve.
///
/// Only objects and arrays can be indexed. Scalars, strings included, never
/// have children, so looking up `length` inside a string yields `None`.
/// Array elements can be addressed by an index segment or by a key holding
/// a canonical decimal integer; object keys by a key or by an index's text.
pub fn get_path<'v>(value: &'v Value, path: &[Segment]) -> Option<&'v Value> {
    let Some((first, rest)) = path.split_first() else {
        return Some(value);
    };

    let child = match value {
        Value::Object(fields) => fields.get(&*first.as_key()),
        Value::Array(elements) => first.as_index().and_then(|i| elements.get(i)),
        _ => None,
    }?;

    get_path(child, rest)
}

/// Returns a copy of `value` with `new_value` written at `path`.
///
/// An empty path replaces the whole value. Containers along the path are
/// reused when their kind fits the segment and replaced with fresh ones when
/// it does not:
///
/// - a key segment needs an object; arrays and scalars are replaced by `{}`
/// - an index segment takes an array, or an object (the index becomes its
///   text key) unless `prefer_arrays` is set, in which case objects and
///   scalars are replaced by `[]`
///
/// Writing past the end of an array pads it with `Value::Null`. An index
/// more than [`MAX_ARRAY_PADDING`] slots past the end is not padded: the
/// array (or the fresh container) becomes an object keyed by index text, so
/// the write still lands where [`get_path`] will look for it.
///
/// # Examples
///
/// ```
/// use treepath::document::Value;
/// use treepath::path::parse_path;
/// use treepath::tree::{get_path, set_path};
///
/// let path = parse_path("x[1]").unwrap();
/// let value = set_path(None, path.as_slice(), Value::from("b"), true);
/// assert_eq!(value.to_string(), r#"{"x":[null,"b"]}"#);
/// assert_eq!(get_path(&value, path.as_slice()), Some(&Value::from("b")));
/// ```
pub fn set_path(
    value: Option<Value>,
    path: &[Segment],
    new_value: Value,
    prefer_arrays: bool,
) -> Value {
    let Some((first, rest)) = path.split_first() else {
        return new_value;
    };

    match writable_container(value, first, prefer_arrays) {
        Container::Array(mut elements) => {
            // Arrays are only chosen for index segments.
            let index = first.as_index().unwrap_or(elements.len());
            let child = if index < elements.len() {
                Some(std::mem::take(&mut elements[index]))
            } else {
                elements.resize(index + 1, Value::Null);
                None
            };
            elements[index] = set_path(child, rest, new_value, prefer_arrays);
            Value::Array(elements)
        }
        Container::Object(mut fields) => {
            let key = first.as_key().into_owned();
            let child = fields.get_mut(&key).map(std::mem::take);
            let updated = set_path(child, rest, new_value, prefer_arrays);
            fields.insert(key, updated);
            Value::Object(fields)
        }
    }
}

enum Container {
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

/// Picks the container `segment` will be written into.
fn writable_container(value: Option<Value>, segment: &Segment, prefer_arrays: bool) -> Container {
    match (value, segment) {
        (Some(Value::Array(elements)), Segment::Index(index))
            if within_padding(*index, elements.len()) =>
        {
            Container::Array(elements)
        }
        (Some(Value::Array(elements)), Segment::Index(index)) => {
            log::debug!(
                "index {} is too far past {} elements, storing the array as an object",
                index,
                elements.len()
            );
            Container::Object(
                elements
                    .into_iter()
                    .enumerate()
                    .map(|(i, element)| (i.to_string(), element))
                    .collect(),
            )
        }
        (Some(Value::Object(fields)), Segment::Index(index))
            if !prefer_arrays || !within_padding(*index, 0) =>
        {
            Container::Object(fields)
        }
        (Some(Value::Object(fields)), Segment::Key(_)) => Container::Object(fields),
        (previous, _) => {
            let fits_array = match segment {
                Segment::Index(index) => within_padding(*index, 0),
                Segment::Key(_) => false,
            };
            let fresh = if fits_array && prefer_arrays {
                Container::Array(Vec::new())
            } else {
                Container::Object(IndexMap::new())
            };
            if let Some(previous) = previous {
                log::trace!(
                    "replacing {} to write segment {:?}",
                    previous.kind(),
                    segment
                );
            }
            fresh
        }
    }
}

fn within_padding(index: usize, len: usize) -> bool {
    index.saturating_sub(len) <= MAX_ARRAY_PADDING
}
