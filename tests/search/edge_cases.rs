//! Inputs a search box will eventually see.

use super::common::{default_engine, make_record, sample_index, synthetic_records};
use blogsift::{MatchEngine, EngineOptions, SearchIndex};

#[test]
fn test_empty_query() {
    assert!(default_engine(sample_index()).search("").is_empty());
}

#[test]
fn test_regex_metacharacters_are_literal() {
    let engine = default_engine(sample_index());
    for query in ["(.*)", "[a-z]+", "c++", "^$", "\\d{3}", "a|b", "?*+"] {
        let _ = engine.search(query);
    }

    let index = SearchIndex::from_records(vec![make_record("Modern c++ idioms", "/cpp/", &[])]);
    assert_eq!(default_engine(index).search("c++").permalinks(), vec!["/cpp/"]);
}

#[test]
fn test_emoji_and_multibyte_queries() {
    let engine = default_engine(sample_index());
    for query in ["🚀🚀🚀", "తెలుగు", "naïve café", "日本語の検索"] {
        let _ = engine.search(query);
    }

    let index = SearchIndex::from_records(vec![make_record("Shipping 🚀 fast", "/ship/", &["🚀"])]);
    assert_eq!(default_engine(index).search("🚀").permalinks(), vec!["/ship/"]);
}

#[test]
fn test_query_longer_than_word_size() {
    let engine = default_engine(sample_index());
    let query = "deploying to kubernetes with argocd today";
    assert!(query.chars().count() > 32);
    assert!(engine
        .search(query)
        .permalinks()
        .contains(&"/posts/argocd-k8s/"));

    let huge = "x".repeat(500);
    assert!(engine.search(&huge).is_empty());
}

#[test]
fn test_whitespace_query_is_total() {
    let engine = default_engine(sample_index());
    for query in ["   ", "\t\n", " a "] {
        for hit in engine.search(query).iter() {
            assert!(hit.score.is_finite());
        }
    }
}

#[test]
fn test_untitled_record_still_found() {
    let index = SearchIndex::from_records(vec![make_record("", "/untitled/", &["rust"])]);
    let engine = default_engine(index);
    let results = engine.search("rust");
    assert_eq!(results.len(), 1);
    assert_eq!(results.hits[0].record.title, "");
}

#[test]
fn test_empty_index() {
    let engine = default_engine(SearchIndex::default());
    assert!(engine.search("anything").is_empty());
}

#[test]
fn test_large_index() {
    let engine = MatchEngine::new(
        SearchIndex::from_records(synthetic_records(500)),
        EngineOptions::default(),
    )
    .unwrap();
    let results = engine.search("terraform");
    assert!(results.len() >= 500 / 8);
    assert!(results.hits[0].record.title.contains("terraform"));
}
