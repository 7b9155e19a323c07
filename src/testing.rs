//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures so tests agree on what a blog looks like.

#![doc(hidden)]

use async_trait::async_trait;

use crate::error::IndexError;
use crate::loader::IndexSource;
use crate::render::{RenderedList, ResultsView};
use crate::types::{SearchIndex, SearchRecord};

/// Create a record with a title, permalink and tags, and no body text.
///
/// This is the canonical implementation used across all tests.
pub fn make_record(title: &str, permalink: &str, tags: &[&str]) -> SearchRecord {
    SearchRecord {
        title: title.to_string(),
        permalink: permalink.to_string(),
        summary: None,
        content: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Same as [`make_record`] with summary and content filled in.
pub fn make_post(
    title: &str,
    permalink: &str,
    tags: &[&str],
    summary: &str,
    content: &str,
) -> SearchRecord {
    SearchRecord {
        summary: Some(summary.to_string()),
        content: Some(content.to_string()),
        ..make_record(title, permalink, tags)
    }
}

/// A small blog: six posts across Kubernetes, Postgres, Go and Docker.
pub fn sample_records() -> Vec<SearchRecord> {
    vec![
        make_post(
            "Deploying to Kubernetes with ArgoCD",
            "/posts/argocd-k8s/",
            &["kubernetes", "argocd", "gitops"],
            "Continuous delivery for a homelab cluster.",
            "ArgoCD watches a Git repository and syncs manifests into the cluster.",
        ),
        make_post(
            "PostgreSQL psql Basics",
            "/posts/psql/",
            &["postgresql", "psql"],
            "Getting around the psql shell.",
            "psql is the interactive terminal for PostgreSQL databases.",
        ),
        make_post(
            "Tracing Go Services with OpenTelemetry",
            "/posts/otel-go/",
            &["opentelemetry", "go", "tracing"],
            "Spans, exporters and context propagation.",
            "Instrument an HTTP handler and ship spans to a collector.",
        ),
        make_post(
            "Go Networking: Dialers and Listeners",
            "/posts/go-net/",
            &["go", "networking"],
            "How net.Dialer and net.Listener fit together.",
            "Timeouts, keepalives and graceful shutdown for TCP servers.",
        ),
        make_post(
            "Docker Race Conditions",
            "/posts/docker-race/",
            &["docker", "concurrency"],
            "When two containers start at once.",
            "Health checks and depends_on ordering in compose files.",
        ),
        make_post(
            "Tuning PostgreSQL Connection Pools",
            "/posts/pg-pools/",
            &["postgresql", "performance"],
            "Sizing pgbouncer for small servers.",
            "Pool size, idle timeouts and transaction mode.",
        ),
    ]
}

pub fn sample_index() -> SearchIndex {
    SearchIndex::from_records(sample_records())
}

/// Serialize records the way a static site generator writes `index.json`.
pub fn index_json(records: &[SearchRecord]) -> Vec<u8> {
    serde_json::to_vec(records).unwrap_or_default()
}

/// Serves a fixed payload.
#[derive(Debug, Clone)]
pub struct StaticIndexSource {
    pub location: String,
    pub body: Vec<u8>,
}

impl StaticIndexSource {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            location: "memory://index.json".to_string(),
            body: body.into(),
        }
    }

    pub fn sample() -> Self {
        Self::new(index_json(&sample_records()))
    }
}

#[async_trait]
impl IndexSource for StaticIndexSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Vec<u8>, IndexError> {
        Ok(self.body.clone())
    }
}

/// Always fails, like a 404 on the index URL.
#[derive(Debug, Clone, Default)]
pub struct FailingIndexSource;

#[async_trait]
impl IndexSource for FailingIndexSource {
    fn location(&self) -> &str {
        "memory://missing.json"
    }

    async fn fetch(&self) -> Result<Vec<u8>, IndexError> {
        Err(IndexError::Status {
            location: self.location().to_string(),
            status: 404,
        })
    }
}

/// A results view that remembers every list it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub history: Vec<RenderedList>,
}

impl RecordingView {
    pub fn current(&self) -> RenderedList {
        self.history.last().cloned().unwrap_or(RenderedList::Empty)
    }

    pub fn renders(&self) -> usize {
        self.history.len()
    }
}

impl ResultsView for RecordingView {
    fn show(&mut self, list: RenderedList) {
        self.history.push(list);
    }
}
