// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Lower is better. Each matching field contributes its Bitap score raised to
//! `key weight × field norm`; the record score is the product. More matching
//! fields, heavier keys and shorter fields all push a record toward 0.

mod core;
pub mod ranking;

pub use self::core::*;
