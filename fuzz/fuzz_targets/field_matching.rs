// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the per-field matcher.
//!
//! Checks the bounds a single field match must respect for any pattern/text
//! pair, including patterns split into several chunks.

#![no_main]

use arbitrary::Arbitrary;
use blogsift::{fold, EngineOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct MatchInput {
    pattern: String,
    text: String,
    threshold: u8,
    distance: u16,
    location: u16,
    min_match_char_length: u8,
    ignore_location: bool,
}

fuzz_target!(|input: MatchInput| {
    let pattern: String = input.pattern.chars().take(100).collect();
    let text: String = input.text.chars().take(500).collect();
    if pattern.is_empty() {
        return;
    }

    let options = EngineOptions {
        threshold: f64::from(input.threshold) / 255.0,
        distance: usize::from(input.distance),
        location: usize::from(input.location),
        min_match_char_length: usize::from(input.min_match_char_length % 8),
        ignore_location: input.ignore_location,
        include_matches: true,
        ..EngineOptions::default()
    };

    let Some(outcome) = options.matcher(&pattern).search_in(&text) else {
        return;
    };

    assert!(outcome.score.is_finite());
    assert!((0.0..=1.0).contains(&outcome.score), "score {}", outcome.score);

    let text_len = fold(&text, false, false).chars().count();
    for range in &outcome.ranges {
        assert!(range.start <= range.end, "inverted range {range:?}");
        assert!(range.end < text_len.max(1), "range {range:?} past end of {text_len}");
    }
});
