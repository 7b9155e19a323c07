// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Client-side fuzzy search for a statically generated blog.
//!
//! The site generator writes one JSON record per page to `index.json`. This
//! crate fetches that index, runs `fuse-rust`'s Bitap matcher over the
//! configured fields, and turns each keystroke in the search box into a
//! ranked list of links.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  loader.rs  │────▶│  engine.rs   │────▶│  render.rs   │
//! │ (IndexSource│     │ (MatchEngine,│     │ (RenderedList│
//! │ parse_index)│     │   search)    │     │ ResultsView) │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        │            ┌──────┴──────┐             │
//!        │            ▼             ▼             │
//!        │      ┌──────────┐  ┌──────────┐        │
//!        │      │  fuzzy/  │  │ scoring/ │        │
//!        │      │(fuse-rust│  │ (norms,  │        │
//!        │      │  glue)   │  │ ranking) │        │
//!        │      └──────────┘  └──────────┘        │
//!        ▼                                        ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                   controller.rs                      │
//! │  Uninitialized → Loading → Ready(engine) | Failed    │
//! │  on_input: length gate → query → render              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use blogsift::{EngineOptions, HtmlResultsList, SearchController, FileIndexSource};
//!
//! let mut controller = SearchController::new(EngineOptions::default(), HtmlResultsList::new())?;
//! controller.initialize(&FileIndexSource::new("public/index.json")).await?;
//!
//! controller.on_input("kubernetes");
//! println!("{}", controller.view().html());
//! ```

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod loader;
pub mod render;
mod scoring;
mod types;
mod utils;

#[doc(hidden)]
pub mod testing;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use config::{
    EngineOptions, KeyName, KeySpec, LogFormat, LoggingSettings, SiteSettings, WeightedKey,
};
pub use controller::{SearchController, SearchStatus, MIN_QUERY_CHARS};
pub use engine::MatchEngine;
pub use error::{ConfigError, ControllerError, IndexError, RenderError};
pub use loader::{parse_index, IndexSource};
#[cfg(feature = "native")]
pub use loader::{source_for, FileIndexSource, HttpIndexSource};
pub use render::{render_html, HtmlResultsList, RenderedList, ResultLink, ResultsView, NO_RESULTS_TEXT};
pub use scoring::{combine_scores, field_norm, ranking::compare_hits, ScoreFactor};
pub use types::{
    FieldMatch, FieldValue, MatchRange, QueryResult, RecordField, RecordId, SearchHit, SearchIndex,
    SearchRecord,
};
pub use utils::{fold, token_count};
