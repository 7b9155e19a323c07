// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! # Field norm
//!
//! ```text
//! norm = round3(1 / tokens^(0.5 × field_norm_weight))
//! ```
//!
//! A one-word tag has norm 1; a 400-word post body has norm 0.05. Since field
//! scores are in `[0, 1]`, a small exponent drags a content match toward 1
//! (weak) while a short title keeps its score.
//!
//! # Record score
//!
//! ```text
//! score = Π s_i^(weight_i × norm_i)     with s_i = ε when s_i == 0
//! ```
//!
//! An exact field match would zero the product and erase every other field's
//! contribution, so it's replaced with `f64::EPSILON`: still the best possible
//! factor, but records with several exact fields stay ordered.

use crate::utils::token_count;

/// Decimal places kept in a field norm.
const NORM_PRECISION: f64 = 1000.0;

/// Field-length norm for a value.
pub fn field_norm(value: &str, field_norm_weight: f64) -> f64 {
    let tokens = token_count(value) as f64;
    let norm = 1.0 / tokens.powf(0.5 * field_norm_weight);
    (norm * NORM_PRECISION).round() / NORM_PRECISION
}

/// One matched field's contribution to a record score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFactor {
    pub score: f64,
    pub weight: f64,
    pub norm: f64,
}

/// Combine per-field scores into a record score.
pub fn combine_scores<I>(factors: I, ignore_field_norm: bool) -> f64
where
    I: IntoIterator<Item = ScoreFactor>,
{
    factors.into_iter().fold(1.0, |total, factor| {
        let base = if factor.score == 0.0 && factor.weight > 0.0 {
            f64::EPSILON
        } else {
            factor.score
        };
        let norm = if ignore_field_norm { 1.0 } else { factor.norm };
        total * base.powf(factor.weight * norm)
    })
}
