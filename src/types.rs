// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search session.
//!
//! These types describe what the site generator hands us (`SearchRecord`,
//! `SearchIndex`) and what a query hands back (`QueryResult`, `SearchHit`,
//! `FieldMatch`).
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **SearchRecord**: `permalink` is always present. A missing `title`
//!   deserializes to `""` so rendering can never fail on it.
//!
//! - **SearchIndex**: permalinks are unique. `SearchIndex::from_records`
//!   keeps the first record for each permalink and drops the rest.
//!
//! - **QueryResult**: hits are ordered best first (lowest score) when
//!   sorting is enabled, and every hit has at least one field match.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Position of a record inside its `SearchIndex`.
///
/// Prevents accidentally passing a character offset where a record position
/// is expected. Ids come from [`SearchIndex::iter`], so they are always in
/// bounds for the index that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RecordId(pub u32);

impl RecordId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// One published page, as emitted into the generator's `index.json`.
///
/// `content` is only ever matched against; it is never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Generators emit `null` for absent taxonomies and titles; treat that the
/// same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The record fields a search can be configured to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    Title,
    Permalink,
    Summary,
    Content,
    Tags,
}

impl RecordField {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordField::Title => "title",
            RecordField::Permalink => "permalink",
            RecordField::Summary => "summary",
            RecordField::Content => "content",
            RecordField::Tags => "tags",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of one field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    List(&'a [String]),
}

impl SearchRecord {
    pub fn field(&self, field: RecordField) -> FieldValue<'_> {
        match field {
            RecordField::Title => FieldValue::Text(&self.title),
            RecordField::Permalink => FieldValue::Text(&self.permalink),
            RecordField::Summary => self
                .summary
                .as_deref()
                .map_or(FieldValue::Missing, FieldValue::Text),
            RecordField::Content => self
                .content
                .as_deref()
                .map_or(FieldValue::Missing, FieldValue::Text),
            RecordField::Tags => FieldValue::List(&self.tags),
        }
    }
}

// =============================================================================
// INDEX
// =============================================================================

/// The parsed search index: every searchable page, in generator order.
///
/// Built once per page view and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
    duplicates_dropped: usize,
}

impl SearchIndex {
    /// Build an index, enforcing permalink uniqueness.
    ///
    /// The first record for a permalink wins; later ones are dropped and
    /// counted so callers can report them.
    pub fn from_records(records: Vec<SearchRecord>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());
        let mut duplicates_dropped = 0;

        for record in records {
            if seen.insert(record.permalink.clone()) {
                kept.push(record);
            } else {
                warn!(permalink = %record.permalink, "dropping record with duplicate permalink");
                duplicates_dropped += 1;
            }
        }

        Self {
            records: kept,
            duplicates_dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&SearchRecord> {
        self.records.get(id.as_usize())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &SearchRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (RecordId(i as u32), record))
    }

    /// How many records were discarded for reusing an earlier permalink.
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }
}

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// Inclusive character range `[start, end]` inside a matched field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

/// One field of one record that matched the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMatch {
    pub key: RecordField,
    /// Position inside `tags` when the key is a list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_index: Option<usize>,
    /// Bitap score for this field: 0 is exact, 1 is no match.
    pub score: f64,
    /// Field-length norm applied when combining field scores.
    pub norm: f64,
    /// Matched character ranges; only filled when `includeMatches` is set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<MatchRange>,
}

/// A record that matched, with its combined relevance score.
///
/// Lower scores are better; 0 is a perfect match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub id: RecordId,
    pub record: &'a SearchRecord,
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

/// Ranked hits for a single query. Not cached; built fresh on every search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult<'a> {
    pub hits: Vec<SearchHit<'a>>,
}

impl<'a> QueryResult<'a> {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchHit<'a>> {
        self.hits.iter()
    }

    /// Permalinks of every hit, in rank order.
    pub fn permalinks(&self) -> Vec<&'a str> {
        self.hits.iter().map(|hit| hit.record.permalink.as_str()).collect()
    }
}
