// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The match engine: an index plus fixed options, ready to answer queries.
//!
//! Building the engine flattens every record into the field values the
//! configured keys select (each tag is its own value), skipping blank ones,
//! and precomputes each value's field norm. Keys naming no index field
//! select nothing. A query then compiles one
//! [`QueryMatcher`](crate::fuzzy::QueryMatcher) and runs it over every
//! value; a record is a hit when any of its values matches.
//!
//! The engine is read-only after construction. Searching never mutates the
//! index, so the same query always produces the same ranking.

use tracing::debug;

use crate::config::{EngineOptions, WeightedKey};
use crate::error::ConfigError;
use crate::scoring::{combine_scores, field_norm, ranking::sort_hits, ScoreFactor};
use crate::types::{
    FieldMatch, FieldValue, QueryResult, RecordField, RecordId, SearchHit, SearchIndex,
};
use crate::utils::is_blank;

#[derive(Debug, Clone)]
struct IndexedValue {
    key: usize,
    field: RecordField,
    tag_index: Option<usize>,
    text: String,
    norm: f64,
}

#[derive(Debug, Clone)]
struct IndexedRecord {
    id: RecordId,
    values: Vec<IndexedValue>,
}

#[derive(Debug, Clone)]
pub struct MatchEngine {
    index: SearchIndex,
    options: EngineOptions,
    keys: Vec<WeightedKey>,
    records: Vec<IndexedRecord>,
}

impl MatchEngine {
    pub fn new(index: SearchIndex, options: EngineOptions) -> Result<Self, ConfigError> {
        let keys = options.weighted_keys()?;
        Ok(Self::with_keys(index, options, keys))
    }

    /// Build from keys the caller already resolved.
    pub(crate) fn with_keys(
        index: SearchIndex,
        options: EngineOptions,
        keys: Vec<WeightedKey>,
    ) -> Self {
        let norm_weight = options.field_norm_weight;
        let indexed = |key: usize, field, tag_index, text: &str| IndexedValue {
            key,
            field,
            tag_index,
            text: text.to_string(),
            norm: field_norm(text, norm_weight),
        };

        let records = index
            .iter()
            .map(|(id, record)| {
                let mut values = Vec::new();
                for (key, weighted) in keys.iter().enumerate() {
                    let Some(field) = weighted.name.field() else {
                        continue;
                    };
                    match record.field(field) {
                        FieldValue::Missing => {}
                        FieldValue::Text(text) => {
                            if !is_blank(text) {
                                values.push(indexed(key, field, None, text));
                            }
                        }
                        FieldValue::List(items) => {
                            for (i, item) in items.iter().enumerate() {
                                if !is_blank(item) {
                                    values.push(indexed(key, field, Some(i), item));
                                }
                            }
                        }
                    }
                }
                IndexedRecord { id, values }
            })
            .collect();

        Self {
            index,
            options,
            keys,
            records,
        }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn keys(&self) -> &[WeightedKey] {
        &self.keys
    }

    /// Fuzzy-search every configured field.
    ///
    /// Total over any input: the query is literal text, and an empty query
    /// matches nothing.
    pub fn search(&self, query: &str) -> QueryResult<'_> {
        let matcher = self.options.matcher(query);
        let mut hits = Vec::new();

        for entry in &self.records {
            let mut matches = Vec::new();
            let mut factors = Vec::new();

            for value in &entry.values {
                let Some(outcome) = matcher.search_in(&value.text) else {
                    continue;
                };
                factors.push(ScoreFactor {
                    score: outcome.score,
                    weight: self.keys[value.key].weight,
                    norm: value.norm,
                });
                matches.push(FieldMatch {
                    key: value.field,
                    tag_index: value.tag_index,
                    score: outcome.score,
                    norm: value.norm,
                    ranges: outcome.ranges,
                });
            }

            if matches.is_empty() {
                continue;
            }
            let Some(record) = self.index.get(entry.id) else {
                continue;
            };

            hits.push(SearchHit {
                id: entry.id,
                record,
                score: combine_scores(factors, self.options.ignore_field_norm),
                matches,
            });
        }

        if self.options.should_sort {
            sort_hits(&mut hits);
        }
        if let Some(limit) = self.options.limit {
            hits.truncate(limit);
        }

        debug!(query, hits = hits.len(), "search completed");
        QueryResult { hits }
    }
}
