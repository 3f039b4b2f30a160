//! Find / replace engine.
//!
//! Pure functions over `(text, byte offset, query)` — the controller owns
//! cursor and selection placement. Directional searches wrap around the
//! buffer once; whole-buffer replacement is a single left-to-right scan.
//!
//! Case-insensitive matching folds both sides to ASCII lowercase, which is a
//! 1:1 byte mapping and therefore keeps every byte offset valid in the
//! original text.

use std::borrow::Cow;
use std::ops::Range;

/// The ephemeral search parameters entered in the find bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindState {
    pub query: String,
    pub case_sensitive: bool,
}

fn fold<'a>(text: &'a str, case_sensitive: bool) -> Cow<'a, str> {
    if case_sensitive {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.to_ascii_lowercase())
    }
}

/// Find the next occurrence of `query` at or after byte offset `from`,
/// wrapping once from the start of the buffer. Empty queries never match.
pub fn find_forward(
    text: &str,
    query: &str,
    from: usize,
    case_sensitive: bool,
) -> Option<Range<usize>> {
    if query.is_empty() {
        return None;
    }
    let hay = fold(text, case_sensitive);
    let needle = fold(query, case_sensitive);
    let from = from.min(hay.len());

    if let Some(rel) = hay[from..].find(needle.as_ref()) {
        let start = from + rel;
        return Some(start..start + query.len());
    }
    hay.find(needle.as_ref())
        .map(|start| start..start + query.len())
}

/// Find the closest occurrence of `query` ending at or before byte offset
/// `before`, wrapping once from the end of the buffer.
pub fn find_backward(
    text: &str,
    query: &str,
    before: usize,
    case_sensitive: bool,
) -> Option<Range<usize>> {
    if query.is_empty() {
        return None;
    }
    let hay = fold(text, case_sensitive);
    let needle = fold(query, case_sensitive);
    let before = before.min(hay.len());

    if let Some(start) = hay[..before].rfind(needle.as_ref()) {
        return Some(start..start + query.len());
    }
    hay.rfind(needle.as_ref())
        .map(|start| start..start + query.len())
}

/// Replace every occurrence of `query` in one pass over the whole buffer.
///
/// Returns the rewritten text and the number of replacements made; zero is a
/// valid outcome. An empty query leaves the text untouched.
pub fn replace_all(
    text: &str,
    query: &str,
    replacement: &str,
    case_sensitive: bool,
) -> (String, usize) {
    if query.is_empty() {
        return (text.to_string(), 0);
    }
    let hay = fold(text, case_sensitive);
    let needle = fold(query, case_sensitive);

    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut pos = 0;
    while let Some(rel) = hay[pos..].find(needle.as_ref()) {
        let start = pos + rel;
        out.push_str(&text[pos..start]);
        out.push_str(replacement);
        count += 1;
        pos = start + query.len();
    }
    out.push_str(&text[pos..]);
    (out, count)
}

/// Count non-overlapping occurrences of `query` (for the find bar counter).
pub fn count_matches(text: &str, query: &str, case_sensitive: bool) -> usize {
    if query.is_empty() {
        return 0;
    }
    let hay = fold(text, case_sensitive);
    let needle = fold(query, case_sensitive);

    let mut count = 0;
    let mut pos = 0;
    while let Some(rel) = hay[pos..].find(needle.as_ref()) {
        count += 1;
        pos += rel + needle.len();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- find_forward ---

    #[test]
    fn test_forward_finds_next_after_offset() {
        let range = find_forward("abcXabc", "abc", 3, false).unwrap();
        assert_eq!(range, 4..7);
    }

    #[test]
    fn test_forward_wraps_once_to_start() {
        // Cursor sits after the trailing occurrence; the search wraps.
        let range = find_forward("abcXabc", "abc", 7, false).unwrap();
        assert_eq!(range, 0..3);
    }

    #[test]
    fn test_forward_not_found() {
        assert_eq!(find_forward("abcdef", "zz", 0, false), None);
    }

    #[test]
    fn test_forward_empty_query_is_noop() {
        assert_eq!(find_forward("anything", "", 0, false), None);
    }

    #[test]
    fn test_forward_case_insensitive_by_default_flag() {
        let range = find_forward("Hello World", "world", 0, false).unwrap();
        assert_eq!(range, 6..11);
    }

    #[test]
    fn test_forward_case_sensitive_misses_wrong_case() {
        assert_eq!(find_forward("Hello World", "world", 0, true), None);
    }

    #[test]
    fn test_forward_offset_past_end_wraps() {
        let range = find_forward("needle", "need", 100, false).unwrap();
        assert_eq!(range, 0..4);
    }

    #[test]
    fn test_forward_single_occurrence_cycles_in_place() {
        let range = find_forward("one match here", "match", 9, false).unwrap();
        assert_eq!(range, 4..9);
    }

    // --- find_backward ---

    #[test]
    fn test_backward_finds_previous_before_offset() {
        let range = find_backward("abcXabc", "abc", 4, false).unwrap();
        assert_eq!(range, 0..3);
    }

    #[test]
    fn test_backward_wraps_once_to_end() {
        let range = find_backward("abcXabc", "abc", 0, false).unwrap();
        assert_eq!(range, 4..7);
    }

    #[test]
    fn test_backward_empty_query_is_noop() {
        assert_eq!(find_backward("anything", "", 5, false), None);
    }

    #[test]
    fn test_backward_excludes_match_straddling_offset() {
        // The occurrence at 4..7 ends after `before`, so it is skipped.
        let range = find_backward("abcXabc", "abc", 6, false).unwrap();
        assert_eq!(range, 0..3);
    }

    #[test]
    fn test_backward_case_insensitive() {
        let range = find_backward("ABC abc", "abc", 5, false).unwrap();
        assert_eq!(range, 0..3);
    }

    // --- replace_all ---

    #[test]
    fn test_replace_all_banana() {
        let (out, count) = replace_all("banana", "a", "bb", true);
        assert_eq!(out, "bbbnbbnbb");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_all_empty_query_is_noop() {
        let (out, count) = replace_all("banana", "", "bb", true);
        assert_eq!(out, "banana");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_replace_all_zero_matches_is_reportable() {
        let (out, count) = replace_all("banana", "z", "q", true);
        assert_eq!(out, "banana");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_replace_all_case_insensitive_preserves_unmatched_case() {
        let (out, count) = replace_all("Dog dog DOG", "dog", "cat", false);
        assert_eq!(out, "cat cat cat");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_all_with_empty_replacement_deletes() {
        let (out, count) = replace_all("a-b-c", "-", "", true);
        assert_eq!(out, "abc");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_replace_all_does_not_rescan_replacement() {
        // Replacement contains the query; the scan must not loop on it.
        let (out, count) = replace_all("aaa", "a", "aa", true);
        assert_eq!(out, "aaaaaa");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_all_across_lines() {
        let (out, count) = replace_all("x\nyx\nx", "x", "w", true);
        assert_eq!(out, "w\nyw\nw");
        assert_eq!(count, 3);
    }

    // --- count_matches ---

    #[test]
    fn test_count_matches_non_overlapping() {
        assert_eq!(count_matches("aaaa", "aa", true), 2);
    }

    #[test]
    fn test_count_matches_empty_query_is_zero() {
        assert_eq!(count_matches("aaaa", "", true), 0);
    }

    #[test]
    fn test_count_matches_case_fold() {
        assert_eq!(count_matches("Ab aB AB ab", "ab", false), 4);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn replace_with_self_is_identity(
                text in "[a-c\n ]{0,80}",
                query in "[a-c]{1,3}",
            ) {
                let (out, _) = replace_all(&text, &query, &query, true);
                prop_assert_eq!(out, text);
            }

            #[test]
            fn replace_count_matches_counter(
                text in "[a-c]{0,80}",
                query in "[a-c]{1,3}",
            ) {
                let (_, count) = replace_all(&text, &query, "Z", true);
                prop_assert_eq!(count, count_matches(&text, &query, true));
            }

            #[test]
            fn forward_result_is_real_occurrence(
                text in "[a-dA-D]{0,60}",
                query in "[a-d]{1,3}",
                from in 0..70usize,
            ) {
                if let Some(range) = find_forward(&text, &query, from, false) {
                    let got = text[range].to_ascii_lowercase();
                    prop_assert_eq!(got, query.to_ascii_lowercase());
                }
            }

            #[test]
            fn backward_result_is_real_occurrence(
                text in "[a-dA-D]{0,60}",
                query in "[a-d]{1,3}",
                before in 0..70usize,
            ) {
                if let Some(range) = find_backward(&text, &query, before, false) {
                    let got = text[range].to_ascii_lowercase();
                    prop_assert_eq!(got, query.to_ascii_lowercase());
                }
            }
        }
    }
}
