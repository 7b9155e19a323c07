//! Engine invariants over generated indexes.

use super::common::{default_engine, make_post};
use blogsift::{compare_hits, EngineOptions, MatchEngine, SearchIndex, SearchRecord};
use proptest::prelude::*;
use std::cmp::Ordering;

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{3,9}").unwrap()
}

fn title_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..6).prop_map(|words| words.join(" "))
}

fn record_strategy() -> impl Strategy<Value = (String, Vec<String>, String)> {
    (
        title_strategy(),
        prop::collection::vec(word_strategy(), 0..4),
        prop::collection::vec(word_strategy(), 0..30).prop_map(|w| w.join(" ")),
    )
}

/// Records with unique permalinks.
fn records_strategy() -> impl Strategy<Value = Vec<SearchRecord>> {
    prop::collection::vec(record_strategy(), 1..12).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, (title, tags, content))| {
                let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                make_post(&title, &format!("/posts/{i}/"), &tags, "", &content)
            })
            .collect()
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A record whose title is exactly the query ranks at least as well as
    /// any record whose title does not match it.
    #[test]
    fn prop_exact_title_dominates(records in records_strategy(), pick in any::<prop::sample::Index>()) {
        let target = pick.get(&records).clone();
        let query = target.title.clone();
        let engine = default_engine(SearchIndex::from_records(records));
        let results = engine.search(&query);

        let target_hit = results
            .iter()
            .find(|h| h.record.permalink == target.permalink);
        prop_assert!(target_hit.is_some(), "exact title not found: {query:?}");
        let target_score = target_hit.map(|h| h.score).unwrap_or(1.0);

        for hit in results.iter() {
            let title_matched = hit.record.title.eq_ignore_ascii_case(&query);
            if !title_matched {
                prop_assert!(
                    hit.score >= target_score || hit.matches.iter().any(|m| m.score == 0.0),
                    "{} ({}) beat exact title {} ({})",
                    hit.record.permalink, hit.score, target.permalink, target_score
                );
            }
        }
    }

    /// Same query, same index: same ranking.
    #[test]
    fn prop_search_deterministic(records in records_strategy(), query in "[a-z ]{0,20}") {
        let engine = default_engine(SearchIndex::from_records(records));
        let first: Vec<String> = engine.search(&query).permalinks().iter().map(|p| p.to_string()).collect();
        let second: Vec<String> = engine.search(&query).permalinks().iter().map(|p| p.to_string()).collect();
        prop_assert_eq!(first, second);
    }

    /// Sorted output respects the ranking comparator.
    #[test]
    fn prop_results_sorted(records in records_strategy(), query in "[a-z]{3,12}") {
        let engine = default_engine(SearchIndex::from_records(records));
        let results = engine.search(&query);
        for pair in results.hits.windows(2) {
            prop_assert_ne!(compare_hits(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    /// No input makes the engine panic or produce an out-of-range score.
    #[test]
    fn prop_search_total(records in records_strategy(), query in any::<String>()) {
        let engine = default_engine(SearchIndex::from_records(records));
        for hit in engine.search(&query).iter() {
            prop_assert!(hit.score.is_finite());
            prop_assert!((0.0..=1.0).contains(&hit.score));
        }
    }

    /// A limit never reorders: limited results are a prefix of the full list.
    #[test]
    fn prop_limit_is_prefix(records in records_strategy(), query in "[a-z]{3,8}", limit in 1usize..5) {
        let full = default_engine(SearchIndex::from_records(records.clone()));
        let limited = MatchEngine::new(
            SearchIndex::from_records(records),
            EngineOptions { limit: Some(limit), ..EngineOptions::default() },
        ).unwrap();

        let full_links = full.search(&query).permalinks();
        let limited_links = limited.search(&query).permalinks();
        prop_assert!(limited_links.len() <= limit);
        prop_assert_eq!(&full_links[..limited_links.len()], &limited_links[..]);
    }
}
