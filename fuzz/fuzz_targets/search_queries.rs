// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for whole-engine queries.
//!
//! Arbitrary bytes go straight into the search box. The engine must not
//! panic, must keep scores in range and must return a sorted, deduplicated
//! list of records that exist in the index.

#![no_main]

use blogsift::testing::sample_index;
use blogsift::{compare_hits, EngineOptions, MatchEngine};
use libfuzzer_sys::fuzz_target;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::OnceLock;

fuzz_target!(|query: &[u8]| {
    static ENGINE: OnceLock<Option<MatchEngine>> = OnceLock::new();
    let Some(engine) = ENGINE
        .get_or_init(|| MatchEngine::new(sample_index(), EngineOptions::default()).ok())
        .as_ref()
    else {
        return;
    };

    let query = String::from_utf8_lossy(query);
    let query: String = query.chars().take(200).collect();

    let results = engine.search(&query);

    assert!(results.len() <= engine.index().len());

    let mut seen = HashSet::new();
    for hit in results.iter() {
        assert!(hit.score.is_finite(), "non-finite score for {query:?}");
        assert!((0.0..=1.0).contains(&hit.score), "score {} out of range", hit.score);
        assert!(engine.index().get(hit.id).is_some(), "dangling record id");
        assert!(seen.insert(hit.id), "record listed twice");
    }

    for pair in results.hits.windows(2) {
        assert_ne!(compare_hits(&pair[0], &pair[1]), Ordering::Greater);
    }
});
