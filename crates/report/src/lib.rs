//! Presentation layer for benchratio.
//!
//! This crate loads JMH result files into the core, and renders what the
//! core derives as markdown tables or SVG charts.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchratio_core::{align, AlignSpec, Direction, IndexOptions};
//! use benchratio_report::{load_index, markdown};
//!
//! let index = load_index("bench_res.json", &IndexOptions::default())?;
//! let spec = AlignSpec::new("RegularNoSuperWord", "SIMD")
//!     .with_prefix("fr.centralesupelec.simd.VectorProfiling.")
//!     .with_direction(Direction::BaselineOverComparison);
//!
//! let report = align(&["mul", "sum", "add"], &index, &index, &spec);
//! print!("{}", markdown::ratio_table(&report, &spec.ratio_label(), &Default::default()));
//! # Ok::<(), benchratio_report::LoadError>(())
//! ```
//!
//! # Modules
//!
//! - [`result`] - JMH JSON result types
//! - [`io`] - Reading results and writing reports
//! - [`markdown`] - Markdown table generation
//! - [`chart`] - SVG ratio charts
//! - [`humanize`] - Byte-size formatting

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod chart;
pub mod humanize;
pub mod io;
pub mod markdown;
pub mod result;

pub use chart::{ChartError, ChartOptions};
pub use markdown::TableOptions;
pub use result::JmhResult;

use benchratio_core::{BenchmarkRecord, IndexOptions, RecordError, ResultIndex};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a result file into an index.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read or decoded.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File being loaded.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file decoded but holds an unusable record.
    #[error("Invalid benchmark results in {}: {source}", .path.display())]
    Record {
        /// File being loaded.
        path: PathBuf,
        /// Underlying error.
        source: RecordError,
    },
}

/// Read a JMH result file as records.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read or is not a JMH
/// JSON array.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<BenchmarkRecord>, LoadError> {
    let path = path.as_ref();
    io::read_records(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JMH result file and index it.
///
/// # Errors
///
/// Returns [`LoadError::Io`] on read or decode failure and
/// [`LoadError::Record`] when a record is malformed (or duplicated under the
/// strict policy).
pub fn load_index(path: impl AsRef<Path>, options: &IndexOptions) -> Result<ResultIndex, LoadError> {
    let path = path.as_ref();
    let records = load_records(path)?;
    let index = ResultIndex::build_with(&records, options).map_err(|source| LoadError::Record {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        benchmarks = index.len(),
        measurements = index.measurement_count(),
        "indexed benchmark results"
    );
    Ok(index)
}
