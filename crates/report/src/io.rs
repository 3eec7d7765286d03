//! I/O operations for benchmark results.
//!
//! This module reads JMH JSON result files and writes rendered reports to
//! the filesystem.

use crate::result::JmhResult;
use benchratio_core::BenchmarkRecord;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Parse a JMH JSON result array.
pub fn parse_results_json(content: &str) -> io::Result<Vec<JmhResult>> {
    serde_json::from_str(content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Read results from a JMH JSON file.
pub fn read_results_json(path: impl AsRef<Path>) -> io::Result<Vec<JmhResult>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let results = parse_results_json(&content)?;
    debug!(path = %path.display(), count = results.len(), "read benchmark results");
    Ok(results)
}

/// Read a JMH JSON file as core benchmark records.
pub fn read_records(path: impl AsRef<Path>) -> io::Result<Vec<BenchmarkRecord>> {
    Ok(read_results_json(path)?
        .into_iter()
        .map(BenchmarkRecord::from)
        .collect())
}

/// Write a rendered report, creating parent directories as needed.
pub fn write_report(path: impl AsRef<Path>, contents: &str) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote report");
    Ok(())
}
