// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A compiled query over [`fuse_rust::Fuse`].
//!
//! Both sides are folded before they reach the library, so it always runs
//! case-sensitive. Its scores and byte ranges come back per chunk; a chunk
//! counts only when its score is within the configured threshold.

use std::ops::Range;

use fuse_rust::{Fuse, Pattern};

use crate::config::EngineOptions;
use crate::types::MatchRange;
use crate::utils::fold;

/// Longest pattern, in bytes, the library scores in one pass. Longer
/// queries are split into chunks of at most this many bytes.
pub const MAX_PATTERN_BYTES: usize = 32;

// Keeps the library's i32 window arithmetic from overflowing.
const MAX_LOCATION: usize = 1 << 24;

// The library never reports a score below this, even for exact matches.
const SCORE_FLOOR: f64 = 0.001;

/// How one field value matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// 0 is a perfect match, larger is worse.
    pub score: f64,
    /// Inclusive character ranges; empty unless `includeMatches` is set.
    pub ranges: Vec<MatchRange>,
}

struct Chunk {
    fuse: Fuse,
    pattern: Pattern,
}

/// Matches one query against many field values.
///
/// Build once per query, then call [`QueryMatcher::search_in`] for every
/// field of every record. The query is literal text: no character has
/// special meaning.
pub struct QueryMatcher {
    folded: String,
    chunks: Vec<Chunk>,
    threshold: f64,
    min_match_char_length: usize,
    include_matches: bool,
    case_sensitive: bool,
    ignore_diacritics: bool,
}

impl QueryMatcher {
    pub fn new(query: &str, options: &EngineOptions) -> Self {
        let folded = fold(query, options.is_case_sensitive, options.ignore_diacritics);
        let chunks = split_into_chunks(&folded)
            .into_iter()
            .filter_map(|(start, text)| {
                let fuse = configure(options, start);
                let pattern = fuse.create_pattern(text)?;
                Some(Chunk { fuse, pattern })
            })
            .collect();

        Self {
            folded,
            chunks,
            threshold: options.threshold.max(SCORE_FLOOR),
            min_match_char_length: options.min_match_char_length,
            include_matches: options.include_matches,
            case_sensitive: options.is_case_sensitive,
            ignore_diacritics: options.ignore_diacritics,
        }
    }

    /// Number of library passes each field costs.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Score `text`, or `None` when it doesn't match.
    pub fn search_in(&self, text: &str) -> Option<MatchOutcome> {
        if self.chunks.is_empty() {
            return None;
        }
        let text = fold(text, self.case_sensitive, self.ignore_diacritics);
        if text.is_empty() {
            return None;
        }

        if text == self.folded {
            let ranges = if self.include_matches {
                vec![MatchRange {
                    start: 0,
                    end: text.chars().count() - 1,
                }]
            } else {
                Vec::new()
            };
            return Some(MatchOutcome { score: 0.0, ranges });
        }

        let wants_ranges = self.include_matches || self.min_match_char_length > 1;
        let mut total_score = 0.0;
        let mut has_matches = false;
        let mut ranges = Vec::new();

        for chunk in &self.chunks {
            let Some(result) = chunk.fuse.search(Some(&chunk.pattern), &text) else {
                total_score += 1.0;
                continue;
            };
            let score = if result.score.is_finite() {
                result.score.clamp(0.0, 1.0)
            } else {
                1.0
            };
            total_score += score;
            if score >= 1.0 || score > self.threshold {
                continue;
            }

            if wants_ranges {
                let found = char_ranges(&text, &result.ranges, self.min_match_char_length);
                if found.is_empty() && self.min_match_char_length > 1 {
                    continue;
                }
                if self.include_matches {
                    ranges.extend(found);
                }
            }
            has_matches = true;
        }

        has_matches.then(|| MatchOutcome {
            score: total_score / self.chunks.len() as f64,
            ranges,
        })
    }
}

/// A matcher for one chunk starting `chunk_start` bytes into the query.
fn configure(options: &EngineOptions, chunk_start: usize) -> Fuse {
    let location = options.location.saturating_add(chunk_start).min(MAX_LOCATION);
    let distance = if options.ignore_location {
        i32::MAX
    } else {
        to_i32(options.distance)
    };

    Fuse {
        location: to_i32(location),
        distance,
        threshold: options.threshold,
        is_case_sensitive: true,
        ..Fuse::default()
    }
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Split on character boundaries into pieces of at most
/// [`MAX_PATTERN_BYTES`], each paired with its byte offset.
fn split_into_chunks(pattern: &str) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut start = 0;

    for (i, c) in pattern.char_indices() {
        if i + c.len_utf8() - start > MAX_PATTERN_BYTES {
            chunks.push((start, &pattern[start..i]));
            start = i;
        }
    }
    if start < pattern.len() {
        chunks.push((start, &pattern[start..]));
    }

    chunks
}

/// Turn the library's end-exclusive byte ranges into inclusive character
/// ranges, dropping runs shorter than `min_len` characters.
fn char_ranges(text: &str, byte_ranges: &[Range<usize>], min_len: usize) -> Vec<MatchRange> {
    let starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let char_at = |byte: usize| starts.partition_point(|&s| s <= byte).saturating_sub(1);

    let mut ranges: Vec<MatchRange> = byte_ranges
        .iter()
        .filter(|r| r.start < r.end && r.start < text.len())
        .map(|r| MatchRange {
            start: char_at(r.start),
            end: char_at(r.end.min(text.len()) - 1),
        })
        .filter(|r| r.end - r.start + 1 >= min_len.max(1))
        .collect();
    ranges.dedup();
    ranges
}
