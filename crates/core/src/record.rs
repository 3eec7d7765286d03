// Copyright 2026 benchratio Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark record types.
//!
//! A [`BenchmarkRecord`] is one measurement emitted by the harness: a
//! benchmark variant run at one input size. Fields are optional at the type
//! level so that a record decoded from a foreign file can be rejected with a
//! precise reason instead of failing somewhere inside the decoder.

use crate::error::MalformedReason;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Size parameter used by the `VectorProfiling` benchmarks.
pub const ARRAY_LENGTH: &str = "ARRAY_LENGTH";

/// Size parameter used by older trace runs.
pub const ARRAY_SIZE: &str = "array_size";

/// A single benchmark measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Fully qualified benchmark name, operation plus variant suffix.
    pub identifier: Option<String>,
    /// Benchmark parameters as string values.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    /// Primary score metric.
    pub score: Option<f64>,
}

/// Input size paired with the score measured at that size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizedScore {
    /// Input size, parsed from the size parameter.
    pub size: u64,
    /// Primary score at that size.
    pub score: f64,
}

impl BenchmarkRecord {
    /// Create a complete record with a single size parameter.
    pub fn new(
        identifier: impl Into<String>,
        size_key: impl Into<String>,
        size: u64,
        score: f64,
    ) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert(size_key.into(), size.to_string());
        Self {
            identifier: Some(identifier.into()),
            parameters,
            score: Some(score),
        }
    }

    /// Add or replace a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Last `.`-separated segment of the identifier, i.e. the benchmark method.
    pub fn method(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .map(|id| id.rsplit('.').next().unwrap_or(id))
    }

    /// Extract identifier, size and score, or the reason the record is unusable.
    pub(crate) fn extract(&self, size_key: &str) -> Result<(&str, SizedScore), MalformedReason> {
        let identifier = self
            .identifier
            .as_deref()
            .ok_or(MalformedReason::MissingIdentifier)?;
        let size = parse_size(&self.parameters, size_key)?;
        let score = self.score.ok_or(MalformedReason::MissingScore)?;
        Ok((identifier, SizedScore { size, score }))
    }
}

/// Parse the size parameter as an integer. Lexicographic comparison of the
/// raw strings would put "16" after "128".
fn parse_size(parameters: &HashMap<String, String>, size_key: &str) -> Result<u64, MalformedReason> {
    let raw = parameters
        .get(size_key)
        .ok_or_else(|| MalformedReason::MissingSize(size_key.to_string()))?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| MalformedReason::InvalidSize {
            key: size_key.to_string(),
            value: raw.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_complete_record() {
        let record = BenchmarkRecord::new("VectorProfiling.mulSIMD", ARRAY_LENGTH, 512, 42.5);
        let (id, point) = record.extract(ARRAY_LENGTH).unwrap();
        assert_eq!(id, "VectorProfiling.mulSIMD");
        assert_eq!(point, SizedScore { size: 512, score: 42.5 });
    }

    #[test]
    fn test_extract_trims_size() {
        let record = BenchmarkRecord::new("sum", ARRAY_SIZE, 0, 1.0).with_param(ARRAY_SIZE, " 2048 ");
        let (_, point) = record.extract(ARRAY_SIZE).unwrap();
        assert_eq!(point.size, 2048);
    }

    #[test]
    fn test_extract_wrong_size_key() {
        let record = BenchmarkRecord::new("sum", ARRAY_SIZE, 16, 1.0);
        assert_eq!(
            record.extract(ARRAY_LENGTH),
            Err(MalformedReason::MissingSize(ARRAY_LENGTH.to_string()))
        );
    }

    #[test]
    fn test_extract_non_integer_size() {
        let record = BenchmarkRecord::new("sum", ARRAY_LENGTH, 0, 1.0).with_param(ARRAY_LENGTH, "1e3");
        assert!(matches!(
            record.extract(ARRAY_LENGTH),
            Err(MalformedReason::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_extract_missing_fields() {
        let mut record = BenchmarkRecord::new("sum", ARRAY_LENGTH, 16, 1.0);
        record.score = None;
        assert_eq!(record.extract(ARRAY_LENGTH), Err(MalformedReason::MissingScore));

        record.identifier = None;
        assert_eq!(
            record.extract(ARRAY_LENGTH),
            Err(MalformedReason::MissingIdentifier)
        );
    }

    #[test]
    fn test_method_is_last_segment() {
        let record = BenchmarkRecord::new("fr.simd.VectorProfiling.addSIMD", ARRAY_LENGTH, 16, 1.0);
        assert_eq!(record.method(), Some("addSIMD"));

        let bare = BenchmarkRecord::new("addSIMD", ARRAY_LENGTH, 16, 1.0);
        assert_eq!(bare.method(), Some("addSIMD"));
    }
}
