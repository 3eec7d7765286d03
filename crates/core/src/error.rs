// Copyright 2026 benchratio Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types raised by the core.
//!
//! Ingestion errors ([`RecordError`]) abort the whole collection being
//! indexed. Alignment errors ([`RatioError`]) are scoped to a single
//! operation and are collected by [`crate::align::align`] so the rest of the
//! batch still produces results.

use thiserror::Error;

/// Errors raised while ingesting benchmark records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// A record is missing a required field or carries an unusable value.
    #[error("Malformed record #{position}{}: {reason}", display_identifier(.identifier))]
    Malformed {
        /// Zero-based position of the record in its collection.
        position: usize,
        /// Identifier of the record, when it has one.
        identifier: Option<String>,
        /// What is wrong with the record.
        reason: MalformedReason,
    },

    /// Two records share an identifier and size under the strict policy.
    #[error("Duplicate size {size} for benchmark {identifier}")]
    DuplicateSize {
        /// Benchmark identifier.
        identifier: String,
        /// The repeated size value.
        size: u64,
    },

    /// A record of one run in a multi-run collection is unusable.
    #[error("Run {run}: {source}")]
    InRun {
        /// Zero-based index of the run.
        run: usize,
        /// Error raised for the record.
        source: Box<RecordError>,
    },
}

/// Reason a record was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// No benchmark identifier.
    #[error("missing identifier")]
    MissingIdentifier,

    /// The configured size parameter is absent.
    #[error("missing size parameter `{0}`")]
    MissingSize(String),

    /// The size parameter is present but not a non-negative integer.
    #[error("size parameter `{key}` is not an integer: {value:?}")]
    InvalidSize {
        /// Size parameter name.
        key: String,
        /// Raw value found in the record.
        value: String,
    },

    /// No primary score.
    #[error("missing score")]
    MissingScore,
}

fn display_identifier(identifier: &Option<String>) -> String {
    identifier
        .as_ref()
        .map(|id| format!(" ({id})"))
        .unwrap_or_default()
}

/// Errors raised while deriving the ratio series of one operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatioError {
    /// The resolved identifier has no entries in the index it was looked up in.
    #[error("Unknown benchmark {identifier} ({side} side of operation {operation})")]
    UnknownBenchmark {
        /// Logical operation being aligned.
        operation: String,
        /// Fully resolved identifier that was not found.
        identifier: String,
        /// Which side of the comparison the identifier belongs to.
        side: Side,
    },

    /// The divisor score at a retained size is exactly zero.
    #[error("Division by zero for operation {operation} at size {size}: {identifier} scored 0")]
    DivisionByZero {
        /// Logical operation being aligned.
        operation: String,
        /// Size at which the zero score was found.
        size: u64,
        /// Identifier whose score is zero.
        identifier: String,
    },
}

impl RatioError {
    /// The operation this error belongs to.
    pub fn operation(&self) -> &str {
        match self {
            Self::UnknownBenchmark { operation, .. } | Self::DivisionByZero { operation, .. } => {
                operation
            }
        }
    }
}

/// Side of a baseline/comparison pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The reference implementation.
    Baseline,
    /// The variant measured against the baseline.
    Comparison,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baseline => f.write_str("baseline"),
            Self::Comparison => f.write_str("comparison"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_includes_identifier() {
        let err = RecordError::Malformed {
            position: 3,
            identifier: Some("a.mulSIMD".to_string()),
            reason: MalformedReason::MissingScore,
        };
        assert_eq!(err.to_string(), "Malformed record #3 (a.mulSIMD): missing score");
    }

    #[test]
    fn test_malformed_message_without_identifier() {
        let err = RecordError::Malformed {
            position: 0,
            identifier: None,
            reason: MalformedReason::MissingIdentifier,
        };
        assert_eq!(err.to_string(), "Malformed record #0: missing identifier");
    }

    #[test]
    fn test_ratio_error_operation() {
        let err = RatioError::DivisionByZero {
            operation: "mul".to_string(),
            size: 16,
            identifier: "mulBase".to_string(),
        };
        assert_eq!(err.operation(), "mul");
        assert!(err.to_string().contains("size 16"));
    }
}
