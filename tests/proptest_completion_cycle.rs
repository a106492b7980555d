//! Property-based tests for the completion cycle and ranking contract.

use std::collections::HashSet;

use proptest::prelude::*;
use tabmatch::prelude::*;

fn arb_mode() -> impl Strategy<Value = MatchMode> {
    prop::sample::select(vec![MatchMode::Exact, MatchMode::Fuzzy, MatchMode::Regex])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// In fuzzy mode every candidate scores, so a full cycle must visit
    /// each one exactly once before closing on the typed query.
    #[test]
    fn fuzzy_cycle_visits_every_candidate_once(
        terms in prop::collection::hash_set("[a-z]{1,8}", 1..6),
        query in "[a-z]{1,8}"
    ) {
        let mut comp = Completion::from_terms(terms.iter(), MatchMode::Fuzzy);
        prop_assert!(comp.type_text(&query));

        let mut seen = HashSet::new();
        for _ in 0..terms.len() {
            let result = comp.complete().unwrap();
            prop_assert!(seen.insert(result.clone()), "revisited {result:?} mid-cycle");
        }

        prop_assert_eq!(&seen, &terms);
        prop_assert_eq!(comp.complete(), Some(query));
    }

    /// The typed item sorts first after a rescore, regardless of mode and
    /// flags. Queries are drawn from plain letters so they are also valid
    /// regex patterns.
    #[test]
    fn typed_item_always_sorts_first(
        terms in prop::collection::hash_set("[a-z]{1,8}", 0..6),
        query in "[a-z]{1,8}",
        mode in arb_mode(),
        ignore_case in any::<bool>(),
        first_match in any::<bool>(),
        show_all in any::<bool>(),
    ) {
        let mut comp = Completion::builder()
            .mode(mode)
            .flags(MatchFlags { ignore_case, first_match, show_all })
            .logger(std::sync::Arc::new(NoopLogger))
            .terms(terms.iter())
            .build();

        prop_assert!(comp.type_text(&query));
        comp.complete();

        let first = comp.items().next().unwrap();
        prop_assert_eq!(first.text.as_str(), query.as_str());
        prop_assert!(first.is_match);
    }

    /// Adding the same text twice never changes `size()` after the first
    /// successful add, no matter what else is in the engine.
    #[test]
    fn duplicate_add_is_idempotent(
        terms in prop::collection::vec("[a-z]{1,8}", 0..6),
        extra in "[a-z]{1,8}"
    ) {
        let mut comp = Completion::from_terms(terms.iter(), MatchMode::Exact);

        comp.add(&extra);
        let size = comp.size();

        prop_assert!(!comp.add(&extra));
        prop_assert_eq!(comp.size(), size);
    }

    /// A cycle in exact mode returns to the typed query after visiting the
    /// matching prefix-extensions, whatever the candidate set.
    #[test]
    fn exact_cycle_closes_on_query(
        terms in prop::collection::hash_set("[a-z]{1,8}", 1..8),
        query in "[a-z]{1,3}"
    ) {
        let matching = terms.iter().filter(|t| t.starts_with(&query)).count();

        let mut comp = Completion::from_terms(terms.iter(), MatchMode::Exact);
        prop_assert!(comp.type_text(&query));

        for _ in 0..matching {
            let result = comp.complete().unwrap();
            prop_assert!(result.starts_with(&query));
        }
        prop_assert_eq!(comp.complete(), Some(query));
    }
}
