// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via the `fuse-rust` Bitap matcher.
//!
//! The library scores one pattern against one string. `matcher` configures
//! it from [`EngineOptions`](crate::config::EngineOptions) and adapts it to
//! field values: folding, long-query chunks, the threshold gate and
//! character-based match ranges.

mod matcher;

pub use matcher::{MatchOutcome, QueryMatcher, MAX_PATTERN_BYTES};
