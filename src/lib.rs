//! # tabmatch
//!
//! Interactive tab-completion engine with exact, fuzzy and regex matching.
//!
//! Given a growing set of candidate strings and a typed query, the engine
//! answers one question repeatedly: *what should the user see on the next
//! Tab press?* Matching runs under one of three disciplines (exact/prefix,
//! Damerau–Levenshtein fuzzy distance, or a regular expression compiled
//! from the query), with Unicode-correct, character-granular comparison,
//! deterministic ranking, and cycling through multiple matches.
//!
//! ## Example
//!
//! ```rust
//! use tabmatch::prelude::*;
//!
//! let mut comp = Completion::from_terms(
//!     ["apfel", "apple", "apply", "arange"],
//!     MatchMode::Exact,
//! );
//! comp.type_text("ap");
//!
//! assert_eq!(comp.complete().as_deref(), Some("apfel"));
//! assert_eq!(comp.complete().as_deref(), Some("apple"));
//! assert_eq!(comp.complete().as_deref(), Some("apply"));
//! assert_eq!(comp.complete().as_deref(), Some("ap"));
//! ```
//!
//! The engine is single-threaded and synchronous: every operation runs to
//! completion, and callers needing concurrent use serialize access
//! externally (one engine per input field is the usual arrangement).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod engine;
pub mod logging;
pub mod mbyte;
pub mod regex_cache;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::distance::{exact_distance, fuzzy_distance, fuzzy_distance_bytes};
    pub use crate::engine::{
        Completion, CompletionBuilder, CompletionItem, CompletionState, MatchFlags, MatchMode,
        MAX_TYPED,
    };
    pub use crate::logging::{CompletionLogger, LogLevel, NoopLogger, TracingLogger};
    pub use crate::regex_cache::{PatternError, RegexCache};
}
