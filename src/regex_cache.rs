//! Compiled-pattern cache for regex-mode matching.
//!
//! The typed query doubles as a regular expression in regex mode. Compiling
//! on every candidate comparison would dominate the match loop, so the
//! compiled pattern is cached here and invalidated exactly when the typed
//! query changes. Case-insensitivity is a compile-time property of the
//! pattern, not a per-comparison option.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error raised when the typed query fails to compile as a pattern.
///
/// Carries the offending pattern together with the regex engine's own
/// diagnostic message.
#[derive(Debug, Error)]
#[error("cannot compile completion pattern {pattern:?}: {source}")]
pub struct PatternError {
    /// The pattern that failed to compile.
    pub pattern: String,
    /// The underlying engine diagnostic.
    #[source]
    pub source: regex::Error,
}

/// Cache holding the compiled form of the typed query.
///
/// Lifecycle: the cache starts dirty, [`compile`](RegexCache::compile)
/// makes it clean, and [`invalidate`](RegexCache::invalidate) (typing)
/// makes it dirty again. The compiled pattern is usable if and only if the
/// cache is clean; a failed compile leaves it dirty, and match attempts
/// against a dirty cache report no match rather than panicking.
#[derive(Debug)]
pub struct RegexCache {
    pattern: Option<Regex>,
    query_chars: usize,
    dirty: bool,
}

impl RegexCache {
    /// Create an empty, dirty cache.
    pub fn new() -> Self {
        Self {
            pattern: None,
            query_chars: 0,
            dirty: true,
        }
    }

    /// Whether the cached pattern is out of date.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drop the cached pattern. Called whenever the typed query changes.
    pub fn invalidate(&mut self) {
        self.pattern = None;
        self.dirty = true;
    }

    /// Compile `query` with multi-line semantics, caching the result.
    ///
    /// `ignore_case` is baked into the compiled pattern. On failure the
    /// cache stays dirty and the error carries the engine's diagnostic for
    /// the caller to log.
    pub fn compile(&mut self, query: &str, ignore_case: bool) -> Result<(), PatternError> {
        match RegexBuilder::new(query)
            .case_insensitive(ignore_case)
            .multi_line(true)
            .build()
        {
            Ok(pattern) => {
                self.query_chars = query.chars().count();
                self.pattern = Some(pattern);
                self.dirty = false;
                Ok(())
            }
            Err(source) => {
                self.pattern = None;
                self.dirty = true;
                Err(PatternError {
                    pattern: query.to_owned(),
                    source,
                })
            }
        }
    }

    /// Run the cached pattern against `candidate`.
    ///
    /// Returns `None` when the cache is dirty or the pattern does not match.
    /// On a match the distance is a heuristic, not a true edit count: the
    /// absolute difference in character length between query and candidate.
    /// Determining real edit cost under an arbitrary pattern is not
    /// attempted.
    pub fn match_distance(&self, candidate: &str) -> Option<usize> {
        let pattern = match (&self.pattern, self.dirty) {
            (Some(pattern), false) => pattern,
            _ => return None,
        };

        if !pattern.is_match(candidate) {
            return None;
        }

        Some(self.query_chars.abs_diff(candidate.chars().count()))
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dirty() {
        let cache = RegexCache::new();
        assert!(cache.is_dirty());
        assert_eq!(cache.match_distance("anything"), None);
    }

    #[test]
    fn compile_then_match() {
        let mut cache = RegexCache::new();
        cache.compile("ap.*", false).unwrap();
        assert!(!cache.is_dirty());

        assert_eq!(cache.match_distance("apfel"), Some(1)); // |4 - 5|
        assert_eq!(cache.match_distance("bertha"), None);
    }

    #[test]
    fn distance_is_length_difference_in_chars() {
        let mut cache = RegexCache::new();
        cache.compile("Äp.*", false).unwrap();
        assert_eq!(cache.match_distance("Äpfel"), Some(1));
        // shorter candidate than pattern text
        cache.compile("apples", false).unwrap();
        assert_eq!(cache.match_distance("apples!"), Some(1));
    }

    #[test]
    fn ignore_case_is_compiled_in() {
        let mut cache = RegexCache::new();
        cache.compile("äp.*", true).unwrap();
        assert_eq!(cache.match_distance("Äpfel"), Some(1));

        cache.compile("äp.*", false).unwrap();
        assert_eq!(cache.match_distance("Äpfel"), None);
    }

    #[test]
    fn failed_compile_leaves_cache_dirty() {
        let mut cache = RegexCache::new();
        cache.compile("ap.*", false).unwrap();

        let err = cache.compile("ap(", false).unwrap_err();
        assert!(err.pattern.contains("ap("));
        assert!(cache.is_dirty());
        assert_eq!(cache.match_distance("apfel"), None);
    }

    #[test]
    fn invalidate_drops_pattern() {
        let mut cache = RegexCache::new();
        cache.compile("ap.*", false).unwrap();
        cache.invalidate();
        assert!(cache.is_dirty());
        assert_eq!(cache.match_distance("apfel"), None);
    }
}
