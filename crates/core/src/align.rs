// Copyright 2026 benchratio Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ratio alignment between baseline and comparison benchmarks.
//!
//! For each logical operation the aligner resolves two identifiers from a
//! naming convention, looks them up in one or two [`ResultIndex`]es, joins
//! their measurements on input size and divides the scores.
//!
//! # Alignment rules
//!
//! ```text
//! baseline_id   = prefix            + op + baseline_suffix
//! comparison_id = comparison_prefix + op + comparison_suffix
//! ```
//!
//! - Sizes are ordered numerically. A size measured more than once keeps the
//!   score ingested last.
//! - Only sizes measured on both sides are kept (inner join).
//! - A zero divisor fails the operation; no partial series is produced.
//! - Failures are scoped to one operation. [`align`] collects them and keeps
//!   going with the rest of the batch.

use crate::error::{RatioError, Side};
use crate::index::ResultIndex;
use crate::record::SizedScore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which score is divided by which.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// `comparison / baseline`: above 1 means the comparison variant is slower.
    #[default]
    ComparisonOverBaseline,
    /// `baseline / comparison`: above 1 means the comparison variant is faster.
    BaselineOverComparison,
}

impl Direction {
    /// The opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            Self::ComparisonOverBaseline => Self::BaselineOverComparison,
            Self::BaselineOverComparison => Self::ComparisonOverBaseline,
        }
    }

    /// Stable textual name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComparisonOverBaseline => "comparison-over-baseline",
            Self::BaselineOverComparison => "baseline-over-comparison",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Direction`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ratio direction {0:?} (expected comparison-over-baseline or baseline-over-comparison)")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "comparison-over-baseline" | "comp/base" => Ok(Self::ComparisonOverBaseline),
            "baseline-over-comparison" | "base/comp" => Ok(Self::BaselineOverComparison),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Naming convention and direction used to pair benchmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignSpec {
    /// Prefix of baseline identifiers, e.g. the benchmark class path.
    pub prefix: String,
    /// Prefix of comparison identifiers. Falls back to `prefix`.
    pub comparison_prefix: Option<String>,
    /// Variant suffix of the baseline identifiers.
    pub baseline_suffix: String,
    /// Variant suffix of the comparison identifiers.
    pub comparison_suffix: String,
    /// Ratio direction.
    pub direction: Direction,
}

impl AlignSpec {
    /// Spec with empty prefixes and the default direction.
    pub fn new(baseline_suffix: impl Into<String>, comparison_suffix: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            comparison_prefix: None,
            baseline_suffix: baseline_suffix.into(),
            comparison_suffix: comparison_suffix.into(),
            direction: Direction::default(),
        }
    }

    /// Set the shared identifier prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set a distinct prefix for comparison identifiers.
    pub fn with_comparison_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comparison_prefix = Some(prefix.into());
        self
    }

    /// Set the ratio direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Resolved baseline identifier for `operation`.
    pub fn baseline_id(&self, operation: &str) -> String {
        format!("{}{}{}", self.prefix, operation, self.baseline_suffix)
    }

    /// Resolved comparison identifier for `operation`.
    pub fn comparison_id(&self, operation: &str) -> String {
        let prefix = self.comparison_prefix.as_deref().unwrap_or(&self.prefix);
        format!("{}{}{}", prefix, operation, self.comparison_suffix)
    }

    /// Human-readable ratio, e.g. `SIMD / RegularNoSuperWord`.
    pub fn ratio_label(&self) -> String {
        match self.direction {
            Direction::ComparisonOverBaseline => {
                format!("{} / {}", self.comparison_suffix, self.baseline_suffix)
            }
            Direction::BaselineOverComparison => {
                format!("{} / {}", self.baseline_suffix, self.comparison_suffix)
            }
        }
    }
}

/// Ratio at one input size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPoint {
    /// Input size.
    pub size: u64,
    /// Score ratio in the requested direction.
    pub ratio: f64,
}

/// Ratio series of one operation, ascending by size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSeries {
    /// Logical operation name.
    pub operation: String,
    /// Points, strictly ascending by size. Empty when no size is shared.
    pub points: Vec<RatioPoint>,
}

/// An operation whose ratio series could not be derived.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationFailure {
    /// Logical operation name.
    pub operation: String,
    /// Why alignment failed.
    pub error: RatioError,
}

/// Outcome of aligning a batch of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioReport {
    series: Vec<OperationSeries>,
    failures: Vec<OperationFailure>,
}

impl RatioReport {
    /// Successfully aligned operations, in request order.
    pub fn series(&self) -> &[OperationSeries] {
        &self.series
    }

    /// Points for `operation`, if it was aligned successfully.
    pub fn get(&self, operation: &str) -> Option<&[RatioPoint]> {
        self.series
            .iter()
            .find(|s| s.operation == operation)
            .map(|s| s.points.as_slice())
    }

    /// Failed operations, in request order.
    pub fn failures(&self) -> &[OperationFailure] {
        &self.failures
    }

    /// Operations that aligned without error but share no size.
    pub fn no_data(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| s.points.is_empty())
            .map(|s| s.operation.as_str())
            .collect()
    }

    /// Every size present in at least one series, ascending.
    pub fn sizes(&self) -> BTreeSet<u64> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.size))
            .collect()
    }

    /// True when no operation failed and none came back empty.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.series.iter().all(|s| !s.points.is_empty())
    }
}

/// Align every operation in `operations`.
///
/// Pass the same index twice when baseline and comparison were captured in
/// one run.
pub fn align<S: AsRef<str>>(
    operations: &[S],
    baseline: &ResultIndex,
    comparison: &ResultIndex,
    spec: &AlignSpec,
) -> RatioReport {
    let mut report = RatioReport::default();

    for operation in operations {
        let operation = operation.as_ref();
        match align_operation(operation, baseline, comparison, spec) {
            Ok(points) => report.series.push(OperationSeries {
                operation: operation.to_string(),
                points,
            }),
            Err(error) => report.failures.push(OperationFailure {
                operation: operation.to_string(),
                error,
            }),
        }
    }

    report
}

/// Derive the ratio series of a single operation.
///
/// # Errors
///
/// [`RatioError::UnknownBenchmark`] when either resolved identifier is
/// missing from its index, [`RatioError::DivisionByZero`] when a retained
/// divisor score is zero.
pub fn align_operation(
    operation: &str,
    baseline: &ResultIndex,
    comparison: &ResultIndex,
    spec: &AlignSpec,
) -> Result<Vec<RatioPoint>, RatioError> {
    let baseline_id = spec.baseline_id(operation);
    let comparison_id = spec.comparison_id(operation);

    let base = by_size(lookup(baseline, operation, &baseline_id, Side::Baseline)?);
    let comp = by_size(lookup(comparison, operation, &comparison_id, Side::Comparison)?);

    base.iter()
        .filter_map(|(size, b)| comp.get(size).map(|c| (*size, *b, *c)))
        .map(|(size, base_score, comp_score)| {
            let (numerator, divisor, divisor_id) = match spec.direction {
                Direction::ComparisonOverBaseline => (comp_score, base_score, &baseline_id),
                Direction::BaselineOverComparison => (base_score, comp_score, &comparison_id),
            };
            if divisor == 0.0 {
                return Err(RatioError::DivisionByZero {
                    operation: operation.to_string(),
                    size,
                    identifier: divisor_id.clone(),
                });
            }
            Ok(RatioPoint {
                size,
                ratio: numerator / divisor,
            })
        })
        .collect()
}

fn lookup<'a>(
    index: &'a ResultIndex,
    operation: &str,
    identifier: &str,
    side: Side,
) -> Result<&'a [SizedScore], RatioError> {
    index
        .get(identifier)
        .ok_or_else(|| RatioError::UnknownBenchmark {
            operation: operation.to_string(),
            identifier: identifier.to_string(),
            side,
        })
}

/// Order by numeric size; a repeated size keeps its last score.
fn by_size(points: &[SizedScore]) -> BTreeMap<u64, f64> {
    points.iter().map(|p| (p.size, p.score)).collect()
}
