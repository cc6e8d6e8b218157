//! Hierarchical name handling
//!
//! Names are `/`-separated paths. Matching works on *cumulative* prefix
//! segments: segment `i` is the concatenation of the first `i + 1` components
//! with no separator, so `/a/b/c` becomes `["a", "ab", "abc"]`. Each trie
//! level therefore commits the full prefix observed so far, which makes
//! longest-prefix matching plain per-level descent: a stored longer name
//! shares every cumulative segment of any shorter name it extends.

/// The path separator for external names
pub const SEPARATOR: char = '/';

/// Split a name into cumulative prefix segments
///
/// Empty components (leading, trailing, or doubled separators) are dropped.
/// Returns an empty vector for a name with no components; callers reject
/// those at the API boundary.
pub fn prefix_segments(name: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut prefix = String::new();
    for component in name.split(SEPARATOR).filter(|c| !c.is_empty()) {
        prefix.push_str(component);
        segments.push(prefix.clone());
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_cumulative() {
        assert_eq!(prefix_segments("/a/b/c"), vec!["a", "ab", "abc"]);
    }

    #[test]
    fn test_separators_are_normalized() {
        assert_eq!(prefix_segments("a/b/"), vec!["a", "ab"]);
        assert_eq!(prefix_segments("//a//b"), vec!["a", "ab"]);
        assert_eq!(prefix_segments("a"), vec!["a"]);
    }

    #[test]
    fn test_empty_names_produce_no_segments() {
        assert!(prefix_segments("").is_empty());
        assert!(prefix_segments("/").is_empty());
        assert!(prefix_segments("///").is_empty());
    }

    #[test]
    fn test_shared_prefix_shares_segments() {
        let long = prefix_segments("/a/b/c");
        let short = prefix_segments("/a/b");
        assert_eq!(&long[..2], &short[..]);
    }
}
