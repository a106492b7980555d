//! Builder for configuring a completion engine.

use std::sync::Arc;

use crate::logging::{CompletionLogger, TracingLogger};

use super::{Completion, MatchFlags, MatchMode};

/// Fluent construction of a [`Completion`] engine.
///
/// Every field has a default (exact mode, no flags, `tracing` logger, no
/// seed terms), so `build` is infallible.
///
/// # Example
///
/// ```rust
/// use tabmatch::prelude::*;
///
/// let mut comp = Completion::builder()
///     .mode(MatchMode::Exact)
///     .ignore_case(true)
///     .terms(["apfel", "apple", "Äpfel"])
///     .build();
///
/// comp.type_text("äp");
/// assert_eq!(comp.complete().as_deref(), Some("Äpfel"));
/// ```
pub struct CompletionBuilder {
    mode: MatchMode,
    flags: MatchFlags,
    logger: Arc<dyn CompletionLogger>,
    terms: Vec<String>,
}

impl CompletionBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self {
            mode: MatchMode::Exact,
            flags: MatchFlags::NONE,
            logger: Arc::new(TracingLogger),
            terms: Vec::new(),
        }
    }

    /// Set the matching mode.
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the whole flag set at once.
    pub fn flags(mut self, flags: MatchFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Fold case while matching.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.flags.ignore_case = ignore_case;
        self
    }

    /// Step one slot at a time instead of scanning to the next match.
    pub fn first_match(mut self, first_match: bool) -> Self {
        self.flags.first_match = first_match;
        self
    }

    /// Cycle through non-matching candidates too.
    pub fn show_all(mut self, show_all: bool) -> Self {
        self.flags.show_all = show_all;
        self
    }

    /// Inject a logging sink. Defaults to the `tracing`-backed logger.
    pub fn logger(mut self, logger: Arc<dyn CompletionLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Seed candidates, added in order at build time with the usual
    /// dedup/empty rules.
    pub fn terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms
            .extend(terms.into_iter().map(|t| t.as_ref().to_owned()));
        self
    }

    /// Construct the engine.
    pub fn build(self) -> Completion {
        let mut comp = Completion::with_parts(self.mode, self.flags, self.logger);
        for term in &self.terms {
            comp.add(term);
        }
        comp
    }
}

impl Default for CompletionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
