// Copyright 2026 benchratio Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result index: benchmark identifier to its (size, score) measurements.
//!
//! The index keeps measurements in the order they were ingested. Sorting by
//! size is left to the consumer ([`crate::align`](mod@crate::align)), which also decides how a
//! repeated size is resolved.

use crate::error::RecordError;
use crate::record::{BenchmarkRecord, SizedScore, ARRAY_LENGTH};
use std::collections::{HashMap, HashSet};

/// How repeated (identifier, size) pairs are treated during ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep every measurement; the later one wins when sizes are deduplicated.
    #[default]
    Supersede,
    /// Reject the collection on the first repeated size.
    Reject,
}

/// Ingestion options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Name of the parameter carrying the input size.
    pub size_key: String,
    /// Treatment of repeated sizes.
    pub duplicates: DuplicatePolicy,
}

impl IndexOptions {
    /// Options for the given size key with the default duplicate policy.
    pub fn new(size_key: impl Into<String>) -> Self {
        Self {
            size_key: size_key.into(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Reject repeated sizes instead of superseding them.
    pub fn strict(mut self) -> Self {
        self.duplicates = DuplicatePolicy::Reject;
        self
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self::new(ARRAY_LENGTH)
    }
}

/// Measurements grouped by benchmark identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultIndex {
    entries: HashMap<String, Vec<SizedScore>>,
}

impl ResultIndex {
    /// Group records by identifier, reading sizes from `size_key`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Malformed`] for the first record missing its
    /// identifier, size parameter or score.
    pub fn build<'a, I>(records: I, size_key: &str) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = &'a BenchmarkRecord>,
    {
        Self::build_with(records, &IndexOptions::new(size_key))
    }

    /// Group records by identifier with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Malformed`] for an unusable record, or
    /// [`RecordError::DuplicateSize`] under [`DuplicatePolicy::Reject`].
    pub fn build_with<'a, I>(records: I, options: &IndexOptions) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = &'a BenchmarkRecord>,
    {
        let mut entries: HashMap<String, Vec<SizedScore>> = HashMap::new();
        let mut seen: HashSet<(String, u64)> = HashSet::new();

        for (position, record) in records.into_iter().enumerate() {
            let (identifier, point) =
                record
                    .extract(&options.size_key)
                    .map_err(|reason| RecordError::Malformed {
                        position,
                        identifier: record.identifier.clone(),
                        reason,
                    })?;

            if options.duplicates == DuplicatePolicy::Reject
                && !seen.insert((identifier.to_string(), point.size))
            {
                return Err(RecordError::DuplicateSize {
                    identifier: identifier.to_string(),
                    size: point.size,
                });
            }

            entries
                .entry(identifier.to_string())
                .or_default()
                .push(point);
        }

        Ok(Self { entries })
    }

    /// Measurements for `identifier`, in ingestion order.
    pub fn get(&self, identifier: &str) -> Option<&[SizedScore]> {
        self.entries.get(identifier).map(Vec::as_slice)
    }

    /// Whether the index holds measurements for `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// All identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of measurements across identifiers.
    pub fn measurement_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
