// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search box controller.
//!
//! ```text
//!                  initialize()
//! Uninitialized ──────────────▶ Loading ──┬──▶ Ready(engine)
//!                                         └──▶ Failed
//! ```
//!
//! `Ready` and `Failed` are terminal. Input is only acted on in `Ready`;
//! in every other state it is dropped without touching the results list.
//! Each accepted input either clears the list (query too short) or replaces
//! it with the ranked hits.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{EngineOptions, WeightedKey};
use crate::engine::MatchEngine;
use crate::error::{ConfigError, ControllerError, IndexError};
use crate::loader::{parse_index, IndexSource};
use crate::render::{RenderedList, ResultsView};
use crate::types::{QueryResult, SearchIndex};

/// Queries shorter than this clear the list instead of searching.
pub const MIN_QUERY_CHARS: usize = 3;

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

impl SearchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStatus::Uninitialized => "uninitialized",
            SearchStatus::Loading => "loading",
            SearchStatus::Ready => "ready",
            SearchStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
enum SearchState {
    Uninitialized,
    Loading,
    Ready(MatchEngine),
    Failed,
}

impl SearchState {
    fn status(&self) -> SearchStatus {
        match self {
            SearchState::Uninitialized => SearchStatus::Uninitialized,
            SearchState::Loading => SearchStatus::Loading,
            SearchState::Ready(_) => SearchStatus::Ready,
            SearchState::Failed => SearchStatus::Failed,
        }
    }
}

/// Owns the index, the engine built from it, and the results view.
#[derive(Debug)]
pub struct SearchController<V: ResultsView> {
    options: EngineOptions,
    keys: Vec<WeightedKey>,
    state: SearchState,
    view: V,
}

impl<V: ResultsView> SearchController<V> {
    /// Options are validated up front so a bad site config fails before any
    /// fetch happens.
    pub fn new(options: EngineOptions, view: V) -> Result<Self, ConfigError> {
        let keys = options.weighted_keys()?;
        Ok(Self {
            options,
            keys,
            state: SearchState::Uninitialized,
            view,
        })
    }

    pub fn status(&self) -> SearchStatus {
        self.state.status()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The engine, once the index has loaded.
    pub fn engine(&self) -> Option<&MatchEngine> {
        match &self.state {
            SearchState::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Fetch and parse the index, then build the engine.
    ///
    /// Allowed once. A fetch or parse failure leaves search disabled for
    /// good and is returned so the page can decide whether to say so.
    pub async fn initialize(&mut self, source: &dyn IndexSource) -> Result<(), ControllerError> {
        self.begin_loading()?;
        debug!(location = source.location(), "fetching search index");

        let loaded = match source.fetch().await {
            Ok(bytes) => parse_index(&bytes),
            Err(err) => Err(err),
        };
        self.finish_loading(loaded)
    }

    /// `Uninitialized → Loading`. For callers that fetch on their own.
    pub fn begin_loading(&mut self) -> Result<(), ControllerError> {
        match self.state {
            SearchState::Uninitialized => {
                self.state = SearchState::Loading;
                Ok(())
            }
            _ => Err(ControllerError::AlreadyStarted {
                state: self.status(),
            }),
        }
    }

    /// `Loading → Ready | Failed`.
    pub fn finish_loading(
        &mut self,
        loaded: Result<SearchIndex, IndexError>,
    ) -> Result<(), ControllerError> {
        if !matches!(self.state, SearchState::Loading) {
            return Err(ControllerError::NotLoading {
                state: self.status(),
            });
        }

        match loaded {
            Ok(index) => {
                info!(
                    records = index.len(),
                    duplicates_dropped = index.duplicates_dropped(),
                    "search index loaded"
                );
                let engine = MatchEngine::with_keys(index, self.options.clone(), self.keys.clone());
                self.state = SearchState::Ready(engine);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "search disabled: failed to load index");
                self.state = SearchState::Failed;
                Err(err.into())
            }
        }
    }

    /// Record that a fetch the caller ran on its own failed.
    ///
    /// Starts loading first if nothing has started. Succeeds only when this
    /// call moves search to `Failed`; a controller that already finished
    /// loading is left as it is and the conflict is returned.
    pub fn fail_loading(&mut self, err: IndexError) -> Result<(), ControllerError> {
        if matches!(self.state, SearchState::Uninitialized) {
            self.begin_loading()?;
        }
        match self.finish_loading(Err(err)) {
            Ok(()) | Err(ControllerError::Index(_)) => Ok(()),
            Err(other) => Err(other),
        }
    }

    /// React to the current value of the search box.
    ///
    /// Returns whether the results list was touched.
    pub fn on_input(&mut self, raw_query: &str) -> bool {
        let SearchState::Ready(engine) = &self.state else {
            debug!(status = %self.status(), "ignoring input: search not ready");
            return false;
        };

        let list = if raw_query.chars().count() < MIN_QUERY_CHARS {
            RenderedList::Empty
        } else {
            RenderedList::from_result(&engine.search(raw_query))
        };
        self.view.show(list);
        true
    }

    /// Run a query without touching the view. `None` until the index loads.
    pub fn query(&self, query: &str) -> Option<QueryResult<'_>> {
        self.engine().map(|engine| engine.search(query))
    }

    /// Replace the whole results list.
    pub fn render(&mut self, list: RenderedList) {
        self.view.show(list);
    }
}
