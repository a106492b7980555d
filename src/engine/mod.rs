//! Completion engine and its state machine.
//!
//! The [`Completion`] engine owns a deduplicated list of candidate strings
//! plus the typed query, and answers the single question an interactive UI
//! keeps asking: *what should the user see on the next Tab press?* Each
//! [`complete`](Completion::complete) call returns exactly one owned string,
//! since the UI shows one candidate at a time and cycles.
//!
//! Internally the engine is a small state machine:
//!
//! | State     | Meaning                        | On `complete()`             |
//! |-----------|--------------------------------|-----------------------------|
//! | `New`     | nothing typed yet              | return the typed item       |
//! | `Init`    | query changed since last result| rescore, sort, return best  |
//! | `NoMatch` | last rescore found nothing     | return the typed item       |
//! | `Single`  | exactly one match              | alternate match ↔ query     |
//! | `Multi`   | several matches                | advance through the matches |
//!
//! `Init` is transient: it is entered by typing and consumed inside the same
//! `complete()` call that observes it. The typed item lives in slot 0 of the
//! item vector, pinned there by a reserved sentinel distance whenever a full
//! sort runs.

mod builder;
mod item;

pub use builder::CompletionBuilder;
pub use item::{CompletionItem, MAX_TYPED};

use std::sync::Arc;

use crate::distance::{exact_distance, fuzzy_distance};
use crate::logging::{CompletionLogger, LogLevel, TracingLogger};
use crate::mbyte;
use crate::regex_cache::RegexCache;

use item::{rank, DIST_NO_MATCH};

/// Matching discipline applied when scoring candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive (or folded) prefix matching.
    Exact,
    /// Damerau–Levenshtein edit distance; every candidate gets a score.
    Fuzzy,
    /// The typed query is compiled as a regular expression.
    Regex,
}

/// Behavior switches orthogonal to the matching mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchFlags {
    /// Fold case while matching. In regex mode this is a compile-time
    /// property of the pattern.
    pub ignore_case: bool,
    /// Step one slot at a time even with several matches, instead of
    /// scanning ahead to the next match.
    pub first_match: bool,
    /// Cycle through non-matching candidates too.
    pub show_all: bool,
}

impl MatchFlags {
    /// No flags set: cycle through matches, case-sensitive.
    pub const NONE: MatchFlags = MatchFlags {
        ignore_case: false,
        first_match: false,
        show_all: false,
    };
}

/// Where the engine is in its completion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// No query typed yet.
    New,
    /// The query changed; candidates must be rescored before answering.
    Init,
    /// Exactly one candidate matched the last rescore.
    Single,
    /// More than one candidate matched.
    Multi,
    /// Nothing matched.
    NoMatch,
}

/// The completion engine.
///
/// Construct with [`Completion::new`], [`Completion::from_terms`] or
/// [`Completion::builder`], feed it candidates with
/// [`add`](Completion::add), update the query with
/// [`type_text`](Completion::type_text), and call
/// [`complete`](Completion::complete) on every Tab press.
///
/// # Example
///
/// ```rust
/// use tabmatch::prelude::*;
///
/// let mut comp = Completion::from_terms(
///     ["apfel", "apple", "apply", "arange"],
///     MatchMode::Exact,
/// );
/// comp.type_text("ap");
///
/// assert_eq!(comp.complete().as_deref(), Some("apfel"));
/// assert_eq!(comp.complete().as_deref(), Some("apple"));
/// assert_eq!(comp.complete().as_deref(), Some("apply"));
/// // the cycle closes on the typed query
/// assert_eq!(comp.complete().as_deref(), Some("ap"));
/// ```
#[derive(Debug)]
pub struct Completion {
    /// Candidates plus the pinned typed item in slot 0.
    items: Vec<CompletionItem>,
    /// Index of the item returned by the last `complete()` call.
    cur: usize,
    state: CompletionState,
    mode: MatchMode,
    flags: MatchFlags,
    regex: RegexCache,
    logger: Arc<dyn CompletionLogger>,
}

impl Completion {
    /// Create an empty engine in the given mode with default flags and the
    /// `tracing`-backed logger.
    pub fn new(mode: MatchMode) -> Self {
        Self::with_parts(mode, MatchFlags::NONE, Arc::new(TracingLogger))
    }

    pub(crate) fn with_parts(
        mode: MatchMode,
        flags: MatchFlags,
        logger: Arc<dyn CompletionLogger>,
    ) -> Self {
        Self {
            items: vec![CompletionItem::typed(String::new())],
            cur: 0,
            state: CompletionState::New,
            mode,
            flags,
            regex: RegexCache::new(),
            logger,
        }
    }

    /// Create an engine pre-populated with `terms`.
    ///
    /// Duplicates and empty strings are skipped silently, with the same
    /// rule [`add`](Completion::add) applies.
    pub fn from_terms<I, S>(terms: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut comp = Self::new(mode);
        for term in terms {
            comp.add(term.as_ref());
        }
        comp
    }

    /// Start building an engine with non-default flags or logger.
    pub fn builder() -> CompletionBuilder {
        CompletionBuilder::new()
    }

    /// The current typed query.
    pub fn typed_text(&self) -> &str {
        &self.items[0].text
    }

    /// Current state of the completion cycle.
    pub fn state(&self) -> CompletionState {
        self.state
    }

    /// The matching mode this engine was constructed with.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The active behavior flags.
    pub fn flags(&self) -> MatchFlags {
        self.flags
    }

    /// Replace the behavior flags.
    ///
    /// Takes effect at the next rescore. Changing `ignore_case` drops any
    /// compiled pattern, since case folding is baked in at compile time.
    pub fn set_flags(&mut self, flags: MatchFlags) {
        if flags.ignore_case != self.flags.ignore_case {
            self.regex.invalidate();
        }
        self.flags = flags;
    }

    /// Candidates currently held, in their current order. Slot 0 is the
    /// typed item.
    pub fn items(&self) -> impl Iterator<Item = &CompletionItem> + '_ {
        self.items.iter()
    }

    /// Number of items held, including the pinned typed item's slot.
    ///
    /// A fresh engine reports 1; two successful adds bring it to 3.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether `text` is already present, by exact byte equality.
    ///
    /// No case folding or Unicode normalization is applied here, and the
    /// typed slot participates: a candidate equal to the current query
    /// counts as a duplicate.
    pub fn contains(&self, text: &str) -> bool {
        self.items.iter().any(|item| item.text == text)
    }

    /// Add a candidate string.
    ///
    /// Returns `false` without mutating anything when `text` is empty,
    /// already present, or the engine is unhealthy.
    pub fn add(&mut self, text: &str) -> bool {
        if !self.health_check() {
            return false;
        }
        if text.is_empty() {
            self.warn("add: rejecting empty candidate");
            return false;
        }
        if self.contains(text) {
            self.debug(&format!("add: duplicate candidate {text:?} skipped"));
            return false;
        }

        self.items.push(CompletionItem::candidate(text.to_owned()));
        self.debug(&format!("add: candidate {text:?}"));
        true
    }

    /// Add a candidate supplied as raw bytes.
    ///
    /// Malformed UTF-8 is rejected with a warning; well-formed input is
    /// handed to [`add`](Completion::add).
    pub fn add_bytes(&mut self, raw: &[u8]) -> bool {
        if mbyte::char_count(raw).is_none() {
            self.warn("add: rejecting malformed byte input");
            return false;
        }
        self.add(&String::from_utf8_lossy(raw))
    }

    /// Set the typed query.
    ///
    /// Marks the engine for rescoring and invalidates the compiled pattern.
    /// Returns `false` on empty input or a query longer than
    /// [`MAX_TYPED`] characters. Re-typing the identical query succeeds
    /// without disturbing the current cycle.
    pub fn type_text(&mut self, text: &str) -> bool {
        if !self.health_check() {
            return false;
        }
        if text.is_empty() {
            self.warn("type: rejecting empty input");
            return false;
        }
        if text.chars().count() > MAX_TYPED {
            self.warn(&format!("type: input exceeds {MAX_TYPED} characters"));
            return false;
        }
        if self.items[0].text == text {
            return true;
        }

        self.items[0].text.clear();
        self.items[0].text.push_str(text);
        self.debug(&format!("type: {text:?}"));

        self.state = CompletionState::Init;
        self.regex.invalidate();
        true
    }

    /// Set the typed query from raw bytes.
    ///
    /// Malformed UTF-8 is rejected with a warning; well-formed input is
    /// handed to [`type_text`](Completion::type_text).
    pub fn type_bytes(&mut self, raw: &[u8]) -> bool {
        if mbyte::char_count(raw).is_none() {
            self.warn("type: rejecting malformed byte input");
            return false;
        }
        self.type_text(&String::from_utf8_lossy(raw))
    }

    /// Produce the next completion.
    ///
    /// The sole read/advance operation. "No match" still yields the typed
    /// query string; `None` is reserved for an unhealthy engine. The result
    /// is an owned copy, so internal reordering never invalidates it.
    pub fn complete(&mut self) -> Option<String> {
        if !self.health_check() {
            return None;
        }

        // bring the compiled pattern up to date before any state decision
        if self.mode == MatchMode::Regex && self.regex.is_dirty() {
            let query = self.items[0].text.clone();
            if let Err(err) = self.regex.compile(&query, self.flags.ignore_case) {
                self.error(&err.to_string());
                // no usable pattern: report no match until a future compile
                self.state = CompletionState::NoMatch;
            }
        }

        match self.state {
            CompletionState::Init => self.rescore(),
            CompletionState::NoMatch | CompletionState::New => self.cur = 0,
            CompletionState::Single => self.step_single(),
            CompletionState::Multi => {
                if self.flags.first_match {
                    self.step_single()
                } else {
                    self.step_multi()
                }
            }
        }

        let result = self.items[self.cur].text.clone();
        self.debug(&format!("complete: {result:?}"));
        Some(result)
    }

    /// Rescore every candidate against the current query, sort, and pick
    /// the follow-up state. Entered from `Init` only.
    fn rescore(&mut self) {
        let query = self.items[0].text.clone();
        let mut n_matches = 0;

        for idx in 1..self.items.len() {
            let dist = self.match_dist(&query, &self.items[idx].text);
            let item = &mut self.items[idx];
            item.match_dist = dist;
            item.is_match = dist >= 0;
            if item.is_match {
                n_matches += 1;
            }
        }

        self.items.sort_by(rank);
        debug_assert!(self.items[0].is_typed());

        if n_matches == 0 {
            self.state = CompletionState::NoMatch;
            self.cur = 0;
            self.debug(&format!("no match for {query:?}"));
        } else {
            self.state = if n_matches > 1 {
                CompletionState::Multi
            } else {
                CompletionState::Single
            };
            // best-ranked real match sits right behind the typed slot
            self.cur = 1;
        }
    }

    /// Distance of `candidate` under the active mode; `-1` means no match.
    fn match_dist(&self, query: &str, candidate: &str) -> i32 {
        let dist = match self.mode {
            MatchMode::Exact => exact_distance(query, candidate, self.flags.ignore_case),
            MatchMode::Fuzzy => Some(fuzzy_distance(query, candidate)),
            MatchMode::Regex => self.regex.match_distance(candidate),
        };
        dist.map_or(DIST_NO_MATCH, |d| i32::try_from(d).unwrap_or(i32::MAX))
    }

    /// Advance one slot, returning to the typed item once the next slot is
    /// not a match (unless `show_all` cycles through everything).
    fn step_single(&mut self) {
        let mut next = self.cur + 1;
        if next == self.items.len() {
            next = 0;
        }
        if !self.items[next].is_match && !self.flags.show_all {
            next = 0;
        }
        self.cur = next;
    }

    /// Advance to the next matching item; exhausting the scan steps back
    /// to the typed item, closing the cycle.
    fn step_multi(&mut self) {
        let mut next = self.cur + 1;
        if next == self.items.len() {
            next = 0;
        }
        for idx in next..self.items.len() {
            if self.items[idx].is_match || self.flags.show_all {
                self.cur = idx;
                return;
            }
        }
        self.cur = 0;
    }

    /// Structural health check run by every public operation. The typed
    /// slot is the one invariant that cannot be encoded in the types.
    fn health_check(&self) -> bool {
        if self.items.is_empty() {
            self.error("health: item list lost its typed slot");
            return false;
        }
        true
    }

    fn debug(&self, message: &str) {
        self.logger.log(LogLevel::Debug, message);
    }

    fn warn(&self, message: &str) {
        self.logger.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.logger.log(LogLevel::Error, message);
    }
}
