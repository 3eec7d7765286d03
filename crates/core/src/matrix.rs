// Copyright 2026 benchratio Contributors
// SPDX-License-Identifier: Apache-2.0

//! Raw score matrix across one or more runs.
//!
//! Groups measurements by input size, then by benchmark method, with one
//! score column per run. Used for side by side tables of the same suite run
//! under different configurations (e.g. 512-bit and 256-bit vector widths).

use crate::error::RecordError;
use crate::record::BenchmarkRecord;
use std::collections::BTreeMap;

/// Scores per size and method, one column per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMatrix {
    runs: usize,
    cells: BTreeMap<u64, BTreeMap<String, Vec<Option<f64>>>>,
}

impl ScoreMatrix {
    /// Build the matrix from `runs`, each a full record collection.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InRun`] wrapping [`RecordError::Malformed`] for
    /// the first unusable record of any run.
    pub fn build(runs: &[&[BenchmarkRecord]], size_key: &str) -> Result<Self, RecordError> {
        let width = runs.len();
        let mut cells: BTreeMap<u64, BTreeMap<String, Vec<Option<f64>>>> = BTreeMap::new();

        for (column, records) in runs.iter().enumerate() {
            for (position, record) in records.iter().enumerate() {
                let (identifier, point) =
                    record
                        .extract(size_key)
                        .map_err(|reason| RecordError::InRun {
                            run: column,
                            source: Box::new(RecordError::Malformed {
                                position,
                                identifier: record.identifier.clone(),
                                reason,
                            }),
                        })?;
                let method = identifier.rsplit('.').next().unwrap_or(identifier);

                let row = cells
                    .entry(point.size)
                    .or_default()
                    .entry(method.to_string())
                    .or_insert_with(|| vec![None; width]);
                row[column] = Some(point.score);
            }
        }

        Ok(Self { runs: width, cells })
    }

    /// Number of runs (score columns).
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Sizes, ascending.
    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.cells.keys().copied()
    }

    /// Methods measured at `size` with their per-run scores, sorted by method.
    pub fn rows(&self, size: u64) -> impl Iterator<Item = (&str, &[Option<f64>])> + '_ {
        self.cells
            .get(&size)
            .into_iter()
            .flat_map(|methods| methods.iter().map(|(m, scores)| (m.as_str(), scores.as_slice())))
    }

    /// Whether the matrix holds no measurement.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
