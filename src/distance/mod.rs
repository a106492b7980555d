//! Distance metric implementations.
//!
//! Pure functions scoring how well a candidate matches a typed query:
//!
//! - **Exact/prefix distance**: the candidate must start with the query;
//!   the distance is the number of characters the candidate extends past it.
//! - **Fuzzy distance**: Damerau–Levenshtein edit distance over characters,
//!   computed by space-optimized dynamic programming (three running rows).
//!
//! Both operate at character granularity, so a multibyte character counts
//! as a single edit. `None` means "does not match"; fuzzy distance over
//! `&str` is total and therefore returns a plain `usize`, while the
//! raw-byte variant reports malformed input as `None` instead.

use crate::mbyte::{char_equal, char_offsets};

/// Compare two characters, optionally folding case.
///
/// Case folding is applied only when both characters are alphabetic;
/// anything else (digits, punctuation, symbols) must match exactly.
fn chars_match(a: char, b: char, ignore_case: bool) -> bool {
    if a == b {
        return true;
    }
    if ignore_case && a.is_alphabetic() && b.is_alphabetic() {
        return a.to_lowercase().eq(b.to_lowercase());
    }
    false
}

/// Compute the exact/prefix distance from `query` to `candidate`.
///
/// The candidate matches when it is at least as long as the query and starts
/// with it, character for character. On a match the distance is the number
/// of characters the candidate carries beyond the matched prefix, i.e. the
/// insertions needed to grow the query into the candidate. This is a prefix
/// match only; the query is never searched for elsewhere in the candidate.
///
/// An empty query matches every candidate with the candidate's full
/// character count as distance.
///
/// # Example
///
/// ```rust
/// use tabmatch::distance::exact_distance;
///
/// assert_eq!(exact_distance("ap", "apfel", false), Some(3));
/// assert_eq!(exact_distance("ap", "arange", false), None);
/// assert_eq!(exact_distance("äp", "Äpfel", true), Some(3));
/// ```
pub fn exact_distance(query: &str, candidate: &str, ignore_case: bool) -> Option<usize> {
    let mut candidate_chars = candidate.chars();

    for qc in query.chars() {
        let cc = candidate_chars.next()?;
        if !chars_match(qc, cc, ignore_case) {
            return None;
        }
    }

    // remaining candidate characters are the insertions needed
    Some(candidate_chars.count())
}

/// Compute the Damerau–Levenshtein distance between two strings.
///
/// Counts the insertions, deletions, substitutions and transpositions of
/// adjacent characters needed to turn `source` into `target`. Distances are
/// measured in characters: `fuzzy_distance("Äpfel", "pfel")` is 1.
///
/// The computation is an iterative dynamic program over an
/// `(m+1) × (n+1)` table, kept as three running rows. The recursive
/// formulation is exponential and is used only as a cross-check oracle in
/// the property-test suite.
///
/// # Example
///
/// ```rust
/// use tabmatch::distance::fuzzy_distance;
///
/// assert_eq!(fuzzy_distance("test", "tset"), 1); // one transposition
/// assert_eq!(fuzzy_distance("drvd", "derived"), 3);
/// ```
pub fn fuzzy_distance(source: &str, target: &str) -> usize {
    let src_idx = char_offsets(source);
    let tar_idx = char_offsets(target);

    let m = src_idx.len();
    let n = tar_idx.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let src = source.as_bytes();
    let tar = target.as_bytes();

    // three rows are enough: transposition reaches back two rows at most
    let mut two_ago = vec![0usize; n + 1];
    let mut prev_row = vec![0usize; n + 1];
    let mut curr_row = vec![0usize; n + 1];

    for (j, item) in prev_row.iter_mut().enumerate().take(n + 1) {
        *item = j;
    }

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = if char_equal(&src[src_idx[i - 1]..], &tar[tar_idx[j - 1]..]) {
                0
            } else {
                1
            };

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution

            // adjacent characters swapped between the two strings
            if i > 1
                && j > 1
                && char_equal(&src[src_idx[i - 1]..], &tar[tar_idx[j - 2]..])
                && char_equal(&src[src_idx[i - 2]..], &tar[tar_idx[j - 1]..])
            {
                curr_row[j] = curr_row[j].min(two_ago[j - 2] + 1);
            }
        }

        std::mem::swap(&mut two_ago, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Damerau–Levenshtein distance over raw bytes.
///
/// Validates both inputs as UTF-8 first; malformed input on either side is
/// reported as `None` (no match), never a panic. Callers holding `&str`
/// should use [`fuzzy_distance`] directly.
pub fn fuzzy_distance_bytes(source: &[u8], target: &[u8]) -> Option<usize> {
    let source = std::str::from_utf8(source).ok()?;
    let target = std::str::from_utf8(target).ok()?;
    Some(fuzzy_distance(source, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_prefix_match() {
        assert_eq!(exact_distance("ap", "apfel", false), Some(3));
        assert_eq!(exact_distance("ap", "apple", false), Some(3));
        assert_eq!(exact_distance("ap", "ap", false), Some(0));
    }

    #[test]
    fn exact_rejects_non_prefix() {
        assert_eq!(exact_distance("ap", "arange", false), None);
        // substring elsewhere in the candidate is not a match
        assert_eq!(exact_distance("pf", "apfel", false), None);
    }

    #[test]
    fn exact_query_longer_than_candidate() {
        assert_eq!(exact_distance("apples", "apple", false), None);
    }

    #[test]
    fn exact_empty_query_matches_everything() {
        assert_eq!(exact_distance("", "apfel", false), Some(5));
        assert_eq!(exact_distance("", "Äpfel", false), Some(5));
        assert_eq!(exact_distance("", "", false), Some(0));
    }

    #[test]
    fn exact_case_sensitivity() {
        assert_eq!(exact_distance("äp", "Äpfel", false), None);
        assert_eq!(exact_distance("äp", "Äpfel", true), Some(3));
        assert_eq!(exact_distance("AP", "apple", true), Some(3));
    }

    #[test]
    fn exact_ignore_case_leaves_non_alphabetics_strict() {
        assert_eq!(exact_distance("1a", "1Apfel", true), Some(4));
        assert_eq!(exact_distance("!", "?x", true), None);
    }

    #[test]
    fn fuzzy_empty_inputs() {
        assert_eq!(fuzzy_distance("", ""), 0);
        assert_eq!(fuzzy_distance("123", ""), 3);
        assert_eq!(fuzzy_distance("", "123"), 3);
    }

    #[test]
    fn fuzzy_known_distances() {
        assert_eq!(fuzzy_distance("chitin", "chtia"), 2);
        assert_eq!(fuzzy_distance("hello", "hell"), 1);
        assert_eq!(fuzzy_distance("email", "mail"), 1);
        assert_eq!(fuzzy_distance("drvd", "derived"), 3);
    }

    #[test]
    fn fuzzy_transpositions() {
        assert_eq!(fuzzy_distance("te", "et"), 1);
        assert_eq!(fuzzy_distance("pete", "ptee"), 1);
        assert_eq!(fuzzy_distance("peter", "pteer"), 1);
        assert_eq!(fuzzy_distance("pete", "pteer"), 2);
        // one insertion plus one transposition
        assert_eq!(fuzzy_distance("fltcap", "flatcpa"), 2);
    }

    #[test]
    fn fuzzy_multibyte_edits_count_as_one() {
        // substitution
        assert_eq!(fuzzy_distance("Äpfel", "äpfel"), 1);
        assert_eq!(fuzzy_distance("Äpfel", "Apfel"), 1);
        // deletion
        assert_eq!(fuzzy_distance("Äpfel", "pfel"), 1);
        // insertion
        assert_eq!(fuzzy_distance("Äpfel", "ÄÄpfel"), 1);
        // transposition of a multibyte pair
        assert_eq!(fuzzy_distance("päfel", "äpfel"), 1);
        assert_eq!(fuzzy_distance("xpäfel", "xäpfel"), 1);
    }

    #[test]
    fn fuzzy_bytes_rejects_malformed() {
        let umlaut = "ä".as_bytes();
        assert_eq!(fuzzy_distance_bytes(&umlaut[1..], b"abc"), None);
        assert_eq!(fuzzy_distance_bytes(umlaut, &umlaut[1..]), None);
        assert_eq!(fuzzy_distance_bytes(b"peter", b"pteer"), Some(1));
        assert_eq!(fuzzy_distance_bytes(b"", b""), Some(0));
    }
}
