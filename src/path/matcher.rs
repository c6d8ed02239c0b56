//! Pattern matching between parsed paths.

use super::ast::Segment;

/// Returns true when `candidate` matches `pattern` segment by segment.
///
/// Both must have the same length. A `*` pattern segment matches anything;
/// otherwise segments match when their text forms are equal, so `Index(1)`
/// and `Key("1")` are interchangeable.
pub fn match_path(candidate: &[Segment], pattern: &[Segment]) -> bool {
    candidate.len() == pattern.len()
        && candidate
            .iter()
            .zip(pattern)
            .all(|(segment, expected)| match_segment(segment, expected))
}

/// Matches a single segment against a single pattern segment.
pub fn match_segment(segment: &Segment, pattern: &Segment) -> bool {
    match_key(&segment.as_key(), pattern)
}

/// Matches the text form of a segment against a single pattern segment.
pub fn match_key(key: &str, pattern: &Segment) -> bool {
    pattern.is_wildcard() || pattern.as_key() == key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(name: &str) -> Segment {
        Segment::key(name)
    }

    fn i(index: usize) -> Segment {
        Segment::Index(index)
    }

    #[test]
    fn test_empty_paths_match() {
        assert!(match_path(&[], &[]));
    }

    #[test]
    fn test_literal_match() {
        assert!(match_path(&[k("a"), k("b")], &[k("a"), k("b")]));
        assert!(!match_path(&[k("a"), k("b")], &[k("a"), k("c")]));
    }

    #[test]
    fn test_wildcards() {
        assert!(match_path(&[k("a"), k("b")], &[k("*"), k("*")]));
        assert!(match_path(&[i(1), k("0")], &[k("*"), k("*")]));
    }

    #[test]
    fn test_index_and_key_interchangeable() {
        assert!(match_path(&[i(1), k("0")], &[i(1), i(0)]));
        assert!(match_path(&[i(1), k("0")], &[k("1"), k("0")]));
        assert!(!match_path(&[i(1), k("0")], &[i(0), k("0")]));
        assert!(!match_path(&[i(1), k("1")], &[i(1), k("0")]));
        assert!(!match_path(&[i(1), k("0")], &[k("0"), k("0")]));
        assert!(!match_path(&[i(1), k("1")], &[i(1), i(0)]));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!match_path(&[i(1), k("0"), k("")], &[k("*"), k("*")]));
        assert!(!match_path(&[i(1), k("0")], &[k("*"), k("*"), k("*")]));
    }

    #[test]
    fn test_empty_key_matches_only_empty() {
        assert!(match_segment(&k(""), &k("")));
        assert!(!match_segment(&k(""), &k("a")));
        assert!(match_segment(&k(""), &k("*")));
    }

    #[test]
    fn test_match_key() {
        assert!(match_key("3", &i(3)));
        assert!(match_key("anything", &k("*")));
        assert!(!match_key("03", &i(3)));
    }

    #[test]
    fn test_candidate_wildcard_is_literal() {
        assert!(!match_segment(&k("*"), &k("a")));
    }
}
