//! Removing elements whose path matches a pattern.

use crate::document::Value;
use crate::path::{match_key, Segment};

/// Removes every element of `value` whose path matches one of `patterns`.
///
/// Returns `None` when an empty pattern matches `value` itself. Otherwise
/// containers keep their kind, losing matched children (arrays close up
/// the gaps), and may end up empty. Scalars are returned unchanged.
///
/// # Examples
///
/// ```
/// use treepath::document::Value;
/// use treepath::path::parse_path;
/// use treepath::tree::strip_matching_elements;
///
/// let value: Value = serde_json::from_str(r#"{"a": "3", "b": {"x": 3}}"#).unwrap();
/// let stripped = strip_matching_elements(value, &[parse_path("b.x").unwrap()]);
/// assert_eq!(stripped.unwrap().to_string(), r#"{"a":"3","b":{}}"#);
/// ```
pub fn strip_matching_elements<P: AsRef<[Segment]>>(value: Value, patterns: &[P]) -> Option<Value> {
    let patterns: Vec<&[Segment]> = patterns.iter().map(AsRef::as_ref).collect();
    strip(value, &patterns)
}

fn strip(value: Value, patterns: &[&[Segment]]) -> Option<Value> {
    if patterns.iter().any(|pattern| pattern.is_empty()) {
        return None;
    }
    if patterns.is_empty() {
        return Some(value);
    }

    match value {
        Value::Object(fields) => Some(Value::Object(
            fields
                .into_iter()
                .filter_map(|(key, child)| {
                    let remaining = remaining_patterns(&key, patterns);
                    strip(child, &remaining).map(|child| (key, child))
                })
                .collect(),
        )),
        Value::Array(elements) => Some(Value::Array(
            elements
                .into_iter()
                .enumerate()
                .filter_map(|(index, child)| {
                    let remaining = remaining_patterns(&index.to_string(), patterns);
                    strip(child, &remaining)
                })
                .collect(),
        )),
        scalar => Some(scalar),
    }
}

/// Tails of the patterns whose first segment matches `key`.
fn remaining_patterns<'p>(key: &str, patterns: &[&'p [Segment]]) -> Vec<&'p [Segment]> {
    patterns
        .iter()
        .filter_map(|&pattern| pattern.split_first())
        .filter(|(head, _)| match_key(key, head))
        .map(|(_, tail)| tail)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn patterns(texts: &[&str]) -> Vec<Path> {
        texts.iter().map(|text| text.parse().unwrap()).collect()
    }

    #[test]
    fn test_no_patterns_is_identity() {
        let none: Vec<Path> = Vec::new();
        assert_eq!(strip_matching_elements(v(json!({"a": "3"})), &none), Some(v(json!({"a": "3"}))));
        assert_eq!(strip_matching_elements(v(json!([1, 2, 3])), &none), Some(v(json!([1, 2, 3]))));
    }

    #[test]
    fn test_empty_pattern_removes_everything() {
        let root = vec![Path::root()];
        assert_eq!(strip_matching_elements(v(json!({"a": "3"})), &root), None);
        assert_eq!(strip_matching_elements(v(json!([1, 2, 3])), &root), None);
        assert_eq!(strip_matching_elements(Value::from(""), &root), None);
    }

    #[test]
    fn test_scalar_unchanged() {
        assert_eq!(
            strip_matching_elements(Value::from("a"), &patterns(&["[1]"])),
            Some(Value::from("a"))
        );
    }

    #[test]
    fn test_unmatched_key_kept() {
        assert_eq!(
            strip_matching_elements(v(json!({"a": "3"})), &patterns(&["[\"1\"]"])),
            Some(v(json!({"a": "3"})))
        );
    }

    #[test]
    fn test_all_children_removed() {
        assert_eq!(
            strip_matching_elements(v(json!({"a": "3", "b": "c"})), &patterns(&["a", "b"])),
            Some(v(json!({})))
        );
        assert_eq!(
            strip_matching_elements(v(json!({"a": "3", "b": "c"})), &patterns(&["*"])),
            Some(v(json!({})))
        );
        assert_eq!(
            strip_matching_elements(v(json!([1, 2])), &patterns(&["[\"0\"]", "[1]"])),
            Some(v(json!([])))
        );
        assert_eq!(
            strip_matching_elements(v(json!([1, 2])), &patterns(&["*"])),
            Some(v(json!([])))
        );
    }

    #[test]
    fn test_array_closes_gaps() {
        assert_eq!(
            strip_matching_elements(v(json!([1, 2, 3])), &patterns(&["[1]"])),
            Some(v(json!([1, 3])))
        );
    }

    #[test]
    fn test_nested() {
        assert_eq!(
            strip_matching_elements(v(json!({"a": "3", "b": 4})), &patterns(&["a"])),
            Some(v(json!({"b": 4})))
        );
        assert_eq!(
            strip_matching_elements(v(json!({"a": "3", "b": {"x": 3}})), &patterns(&["b.x"])),
            Some(v(json!({"a": "3", "b": {}})))
        );
        assert_eq!(
            strip_matching_elements(
                v(json!({"a": "3", "b": [1, 2, 3], "c": 4})),
                &patterns(&["b[1]", "c"])
            ),
            Some(v(json!({"a": "3", "b": [1, 3]})))
        );
    }

    #[test]
    fn test_wildcard_in_middle() {
        assert_eq!(
            strip_matching_elements(
                v(json!({"users": [{"name": "a", "pw": 1}, {"name": "b", "pw": 2}]})),
                &patterns(&["users.*.pw"])
            ),
            Some(v(json!({"users": [{"name": "a"}, {"name": "b"}]})))
        );
    }

    #[test]
    fn test_pattern_longer_than_tree() {
        assert_eq!(
            strip_matching_elements(v(json!({"a": 1})), &patterns(&["a.b.c"])),
            Some(v(json!({"a": 1})))
        );
    }
}
