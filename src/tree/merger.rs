//! Deep merging of two tree values.

use crate::document::Value;
use crate::path::{match_path, Segment};

/// Deep-merges `overlay` onto `base`.
///
/// Objects merge key by key, recursing into keys present on both sides.
/// Arrays are overlaid positionally (overlay elements replace base elements
/// at the same index, extra base elements survive) unless the array's path
/// matches one of `concat_patterns`, in which case the overlay is appended.
/// Any other combination lets the overlay win. A missing side yields the
/// other side unchanged.
///
/// # Examples
///
/// ```
/// use treepath::document::Value;
/// use treepath::path::parse_path;
/// use treepath::tree::merge;
///
/// let base: Value = serde_json::from_str(r#"{"x": [1, 2], "y": [1, 2]}"#).unwrap();
/// let overlay: Value = serde_json::from_str(r#"{"x": [3, 4, 5], "y": [3, 4]}"#).unwrap();
/// let merged = merge(Some(base), Some(overlay), &[parse_path("x").unwrap()]).unwrap();
/// assert_eq!(merged.to_string(), r#"{"x":[1,2,3,4,5],"y":[3,4]}"#);
/// ```
pub fn merge<P: AsRef<[Segment]>>(
    base: Option<Value>,
    overlay: Option<Value>,
    concat_patterns: &[P],
) -> Option<Value> {
    merge_at(base, overlay, concat_patterns, &[])
}

/// Like [`merge`], for values that sit at `path` inside a larger tree.
///
/// `path` is what `concat_patterns` are matched against.
pub fn merge_at<P: AsRef<[Segment]>>(
    base: Option<Value>,
    overlay: Option<Value>,
    concat_patterns: &[P],
    path: &[Segment],
) -> Option<Value> {
    match (base, overlay) {
        (base, None) => base,
        (None, overlay) => overlay,
        (Some(base), Some(overlay)) => {
            let patterns: Vec<&[Segment]> = concat_patterns.iter().map(AsRef::as_ref).collect();
            let mut path = path.to_vec();
            Some(merge_values(base, overlay, &patterns, &mut path))
        }
    }
}

fn merge_values(
    base: Value,
    overlay: Value,
    concat_patterns: &[&[Segment]],
    path: &mut Vec<Segment>,
) -> Value {
    match (base, overlay) {
        (Value::Object(mut fields), Value::Object(overlay_fields)) => {
            for (key, value) in overlay_fields {
                match fields.get_mut(&key) {
                    Some(slot) => {
                        path.push(Segment::Key(key));
                        let existing = std::mem::take(slot);
                        *slot = merge_values(existing, value, concat_patterns, path);
                        path.pop();
                    }
                    None => {
                        fields.insert(key, value);
                    }
                }
            }
            Value::Object(fields)
        }
        (Value::Array(mut elements), Value::Array(overlay_elements)) => {
            if concat_patterns.iter().any(|pattern| match_path(path.as_slice(), pattern)) {
                elements.extend(overlay_elements);
            } else {
                for (index, value) in overlay_elements.into_iter().enumerate() {
                    match elements.get_mut(index) {
                        Some(slot) => *slot = value,
                        None => elements.push(value),
                    }
                }
            }
            Value::Array(elements)
        }
        (_, overlay) => overlay,
    }
}
