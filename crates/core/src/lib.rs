// Copyright 2026 benchratio Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core of benchratio: index microbenchmark records and derive
//! baseline/comparison ratios across input sizes.
//!
//! This crate is pure: it performs no I/O and no logging. Records come in
//! already decoded, results go out as plain values for a renderer.
//!
//! # Quick Start
//!
//! ```
//! use benchratio_core::{align, AlignSpec, BenchmarkRecord, Direction, ResultIndex, ARRAY_LENGTH};
//!
//! let records = vec![
//!     BenchmarkRecord::new("mulRegular", ARRAY_LENGTH, 512, 40.0),
//!     BenchmarkRecord::new("mulSIMD", ARRAY_LENGTH, 512, 10.0),
//! ];
//! let index = ResultIndex::build(&records, ARRAY_LENGTH)?;
//!
//! let spec = AlignSpec::new("Regular", "SIMD").with_direction(Direction::BaselineOverComparison);
//! let report = align(&["mul"], &index, &index, &spec);
//!
//! assert_eq!(report.get("mul").unwrap()[0].ratio, 4.0);
//! # Ok::<(), benchratio_core::RecordError>(())
//! ```
//!
//! # Modules
//!
//! - [`record`] - Input records and size parameters
//! - [`index`] - Grouping records by identifier
//! - [`align`] - Ratio derivation between variants
//! - [`matrix`] - Raw scores side by side across runs
//! - [`error`] - Error types

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod align;
pub mod error;
pub mod index;
pub mod matrix;
pub mod record;

pub use align::{
    align, align_operation, AlignSpec, Direction, OperationFailure, OperationSeries,
    ParseDirectionError, RatioPoint, RatioReport,
};
pub use error::{MalformedReason, RatioError, RecordError, Side};
pub use index::{DuplicatePolicy, IndexOptions, ResultIndex};
pub use matrix::ScoreMatrix;
pub use record::{BenchmarkRecord, SizedScore, ARRAY_LENGTH, ARRAY_SIZE};
