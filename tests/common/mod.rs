//! Shared test utilities and fixtures.

#![allow(dead_code)]

use blogsift::testing::RecordingView;
use blogsift::{EngineOptions, MatchEngine, SearchController, SearchIndex, SearchRecord};

// Re-export canonical test utilities from blogsift::testing
pub use blogsift::testing::{
    index_json, make_post, make_record, sample_index, sample_records, FailingIndexSource,
    StaticIndexSource,
};

/// The two-post index from the search page's acceptance scenario.
pub fn argo_psql_index() -> SearchIndex {
    SearchIndex::from_records(vec![
        make_record("ArgoCD Setup", "/posts/argocd", &["argocd"]),
        make_record("PostgreSQL psql Basics", "/posts/psql", &["psql"]),
    ])
}

pub fn default_engine(index: SearchIndex) -> MatchEngine {
    MatchEngine::new(index, EngineOptions::default()).expect("default options are valid")
}

pub fn engine_with(index: SearchIndex, options: EngineOptions) -> MatchEngine {
    MatchEngine::new(index, options).expect("options are valid")
}

/// A controller that already has `index` loaded.
pub fn ready_controller(index: SearchIndex) -> SearchController<RecordingView> {
    ready_controller_with(index, EngineOptions::default())
}

pub fn ready_controller_with(
    index: SearchIndex,
    options: EngineOptions,
) -> SearchController<RecordingView> {
    let mut controller =
        SearchController::new(options, RecordingView::default()).expect("options are valid");
    controller.begin_loading().expect("fresh controller");
    controller
        .finish_loading(Ok(index))
        .expect("index loads");
    controller
}

/// A larger synthetic blog for ranking and property tests.
pub fn synthetic_records(n: usize) -> Vec<SearchRecord> {
    const TOPICS: [&str; 8] = [
        "kubernetes", "postgres", "golang", "docker", "terraform", "grafana", "nginx", "redis",
    ];
    (0..n)
        .map(|i| {
            let topic = TOPICS[i % TOPICS.len()];
            let other = TOPICS[(i * 3 + 1) % TOPICS.len()];
            make_post(
                &format!("Notes on {topic} part {i}"),
                &format!("/posts/{topic}-{i}/"),
                &[topic, other],
                &format!("Running {topic} next to {other}."),
                &format!("A long walkthrough of {topic} configuration, with {other} in front."),
            )
        })
        .collect()
}
