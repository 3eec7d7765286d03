//! Markdown output generation for benchmark results.
//!
//! Two tables are supported: ratio tables derived by the aligner, and raw
//! score tables laying one or more runs side by side. Both are grouped by
//! input size with one `##` section per size.

use crate::humanize::human_array_size;
use benchratio_core::{RatioReport, ScoreMatrix};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

/// Table layout options.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Width in bytes of one array element, used for section headings.
    pub element_bytes: u64,
    /// Optional `#` title.
    pub title: Option<String>,
    /// Optional generation timestamp printed under the title.
    pub generated: Option<DateTime<Utc>>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            element_bytes: 4,
            title: None,
            generated: None,
        }
    }
}

/// Render a ratio report as markdown.
///
/// `ratio_label` is the column header, e.g. `RegularNoSuperWord / SIMD`.
pub fn ratio_table(report: &RatioReport, ratio_label: &str, options: &TableOptions) -> String {
    let mut output = String::new();
    let _ = write_ratio_table(&mut output, report, ratio_label, options);
    output
}

/// Render a ratio report as markdown into `out`.
pub fn write_ratio_table<W: Write>(
    out: &mut W,
    report: &RatioReport,
    ratio_label: &str,
    options: &TableOptions,
) -> fmt::Result {
    write_header(out, options)?;

    for size in report.sizes() {
        writeln!(out, "## {}", human_array_size(size, options.element_bytes))?;
        writeln!(out)?;
        writeln!(out, "| Operation | {} |", ratio_label)?;
        writeln!(out, "| -------- | -------- |")?;

        for series in report.series() {
            if let Some(point) = series.points.iter().find(|p| p.size == size) {
                writeln!(out, "| {} | {:.2} |", series.operation, point.ratio)?;
            }
        }
        writeln!(out)?;
    }

    let no_data = report.no_data();
    if !report.failures().is_empty() || !no_data.is_empty() {
        writeln!(out, "## Missing results")?;
        writeln!(out)?;
        writeln!(out, "| Operation | Status |")?;
        writeln!(out, "| -------- | -------- |")?;
        for failure in report.failures() {
            writeln!(out, "| {} | {} |", failure.operation, failure.error)?;
        }
        for operation in no_data {
            writeln!(out, "| {} | no data |", operation)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Render raw scores of one or more runs as markdown.
///
/// `labels` names the score columns; runs without a label are numbered.
/// Missing cells render as `-`.
pub fn score_table(matrix: &ScoreMatrix, labels: &[String], unit: &str, options: &TableOptions) -> String {
    let mut output = String::new();
    let _ = write_score_table(&mut output, matrix, labels, unit, options);
    output
}

/// Render raw scores of one or more runs as markdown into `out`.
pub fn write_score_table<W: Write>(
    out: &mut W,
    matrix: &ScoreMatrix,
    labels: &[String],
    unit: &str,
    options: &TableOptions,
) -> fmt::Result {
    write_header(out, options)?;

    let columns: Vec<String> = (0..matrix.runs())
        .map(|i| {
            let label = labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("run {}", i + 1));
            format!("{}({})", unit, label)
        })
        .collect();

    for size in matrix.sizes() {
        writeln!(out, "## {}", human_array_size(size, options.element_bytes))?;
        writeln!(out)?;
        writeln!(out, "| Benchmark | {} |", columns.join(" | "))?;
        writeln!(out, "| -------- |{}", " -------- |".repeat(columns.len()))?;

        for (method, scores) in matrix.rows(size) {
            let cells: Vec<String> = scores
                .iter()
                .map(|score| match score {
                    Some(score) => format!("{:.2}", score),
                    None => "-".to_string(),
                })
                .collect();
            writeln!(out, "| {} | {} |", method, cells.join(" | "))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_header<W: Write>(out: &mut W, options: &TableOptions) -> fmt::Result {
    if let Some(title) = &options.title {
        writeln!(out, "# {}", title)?;
        writeln!(out)?;
    }
    if let Some(generated) = options.generated {
        writeln!(out, "Generated: {}", generated.to_rfc3339())?;
        writeln!(out)?;
    }
    Ok(())
}
