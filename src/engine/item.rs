//! Completion items and the ranking they are sorted by.

use std::cmp::Ordering;

/// Longest typed query the engine accepts, in characters.
pub const MAX_TYPED: usize = 100;

/// Distance of an item that does not match the current query.
pub(crate) const DIST_NO_MATCH: i32 = -1;

/// Distance reserved for the pinned typed item.
///
/// Strictly below every real match distance, so a full sort always carries
/// the typed item to the front of the matches.
pub(crate) const DIST_TYPED: i32 = -(MAX_TYPED as i32 + 1);

/// A candidate string scored against the current query.
///
/// `match_dist` is a signed score: non-negative values come from the active
/// distance function, `-1` marks a non-match, and the reserved very-negative
/// sentinel pins the typed item. `is_match` and `match_dist` are recomputed
/// together whenever the typed query changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// The candidate text, owned by the engine.
    pub text: String,
    /// Score under the current query; `-1` means no match.
    pub match_dist: i32,
    /// Whether this item matched during the last recompute.
    pub is_match: bool,
}

impl CompletionItem {
    /// A fresh, not-yet-scored candidate.
    pub(crate) fn candidate(text: String) -> Self {
        Self {
            text,
            match_dist: DIST_NO_MATCH,
            is_match: false,
        }
    }

    /// The pinned typed item. Always a match, always first after a sort.
    pub(crate) fn typed(text: String) -> Self {
        Self {
            text,
            match_dist: DIST_TYPED,
            is_match: true,
        }
    }

    pub(crate) fn is_typed(&self) -> bool {
        self.match_dist == DIST_TYPED
    }
}

/// Alphabetical comparison without a platform locale dependency.
///
/// Characters are compared case-folded first; fully case-equal strings fall
/// back to their exact character order so the result is still total.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Ranking applied after every recompute, most-preferred first.
///
/// Matches sort before non-matches; non-matches sort alphabetically among
/// themselves; among matches the typed item's sentinel wins, then ascending
/// distance, then alphabetical order. This ordering is the ranking contract
/// regardless of which mode produced the distances.
pub(crate) fn rank(a: &CompletionItem, b: &CompletionItem) -> Ordering {
    match (a.is_match, b.is_match) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => collate(&a.text, &b.text),
        (true, true) => a
            .match_dist
            .cmp(&b.match_dist)
            .then_with(|| collate(&a.text, &b.text)),
    }
}
