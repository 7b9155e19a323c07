// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.

use crate::types::SearchHit;
use std::cmp::Ordering;

/// Compare two hits for ranking.
///
/// Sort order:
/// 1. **Score** - ascending (0 is a perfect match)
/// 2. **Record ID** - index order, so equal scores keep generator order
pub fn compare_hits(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    a.score.total_cmp(&b.score).then_with(|| a.id.cmp(&b.id))
}

/// Sort hits best first.
pub fn sort_hits(hits: &mut [SearchHit<'_>]) {
    hits.sort_by(compare_hits);
}
