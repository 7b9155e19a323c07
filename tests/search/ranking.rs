//! Result ordering: score, weights, field norms, limits.

use super::common::{default_engine, engine_with, make_post, make_record, sample_index};
use blogsift::{EngineOptions, KeySpec, RecordField, SearchIndex};

fn title_only() -> EngineOptions {
    EngineOptions {
        keys: vec![KeySpec::from(RecordField::Title)],
        ..EngineOptions::default()
    }
}

#[test]
fn test_exact_title_ranks_first() {
    let engine = default_engine(sample_index());
    let results = engine.search("Docker Race Conditions");
    assert_eq!(results.permalinks()[0], "/posts/docker-race/");
}

#[test]
fn test_scores_ascend() {
    let engine = default_engine(sample_index());
    let results = engine.search("postgres");
    assert!(results.len() >= 2);
    for pair in results.hits.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
}

#[test]
fn test_same_query_same_order() {
    let engine = default_engine(sample_index());
    for query in ["go", "postgres", "tracing services", "docker"] {
        assert_eq!(
            engine.search(query).permalinks(),
            engine.search(query).permalinks(),
            "query {query:?}"
        );
    }
}

#[test]
fn test_shorter_field_wins() {
    let index = SearchIndex::from_records(vec![
        make_record("Redis cluster failover in production", "/long/", &[]),
        make_record("Redis tips", "/short/", &[]),
    ]);
    let engine = engine_with(index, title_only());
    assert_eq!(engine.search("redis").permalinks(), vec!["/short/", "/long/"]);
}

#[test]
fn test_ignore_field_norm_falls_back_to_index_order() {
    let index = SearchIndex::from_records(vec![
        make_record("Redis cluster failover in production", "/long/", &[]),
        make_record("Redis tips", "/short/", &[]),
    ]);
    let options = EngineOptions {
        ignore_field_norm: true,
        ..title_only()
    };
    let engine = engine_with(index, options);
    assert_eq!(engine.search("redis").permalinks(), vec!["/long/", "/short/"]);
}

#[test]
fn test_key_weight_breaks_tie() {
    let records = vec![
        make_post("Misc notes", "/content-hit/", &[], "", "grafana dashboards"),
        make_post("Grafana dashboards", "/title-hit/", &[], "", "nothing relevant"),
    ];
    let keys = |title_weight: f64| EngineOptions {
        keys: vec![
            KeySpec::Weighted {
                name: RecordField::Title.into(),
                weight: title_weight,
            },
            KeySpec::from(RecordField::Content),
        ],
        ..EngineOptions::default()
    };

    let equal = engine_with(SearchIndex::from_records(records.clone()), keys(1.0));
    assert_eq!(
        equal.search("grafana").permalinks(),
        vec!["/content-hit/", "/title-hit/"]
    );

    let title_heavy = engine_with(SearchIndex::from_records(records), keys(3.0));
    assert_eq!(
        title_heavy.search("grafana").permalinks(),
        vec!["/title-hit/", "/content-hit/"]
    );
}

#[test]
fn test_limit_keeps_best_hits() {
    let full = default_engine(sample_index());
    let best = full.search("postgres").permalinks()[0];

    let limited = engine_with(
        sample_index(),
        EngineOptions {
            limit: Some(1),
            ..EngineOptions::default()
        },
    );
    assert_eq!(limited.search("postgres").permalinks(), vec![best]);
}

#[test]
fn test_unsorted_keeps_index_order() {
    let engine = engine_with(
        sample_index(),
        EngineOptions {
            should_sort: false,
            ..EngineOptions::default()
        },
    );
    let ids: Vec<u32> = engine.search("postgres").iter().map(|h| h.id.get()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}
