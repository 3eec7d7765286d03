//! SVG line charts of ratio series.
//!
//! Sizes are plotted on a base-2 logarithmic axis: each point sits at
//! `log2(size)` and ticks are labelled with the size itself. One line per
//! operation. An optional second panel repeats the chart restricted to the
//! first few sizes of each series, where small-array effects dominate.
//! Operations without a drawable point still get a grey legend entry marked
//! `no data` or `failed`.

use crate::io::write_report;
use benchratio_core::{OperationSeries, RatioReport};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 18;
const TICK_LABEL_FONT_SIZE: u32 = 14;

const MISSING_COLOR: RGBColor = RGBColor(150, 150, 150);

const COLORS: &[RGBColor] = &[
    RGBColor(219, 68, 55),  // red
    RGBColor(66, 133, 244), // blue
    RGBColor(15, 157, 88),  // green
    RGBColor(244, 160, 0),  // amber
    RGBColor(171, 71, 188), // purple
    RGBColor(0, 172, 193),  // cyan
];

/// Errors raised while rendering a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// No operation has a single point to draw.
    #[error("No ratio data to plot")]
    NoData,

    /// The plotting backend failed.
    #[error("Chart rendering failed: {0}")]
    Drawing(String),

    /// Writing the SVG file failed.
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Chart layout options.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Chart caption.
    pub title: String,
    /// Y axis description, usually the ratio label.
    pub y_label: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// When set, add a second panel limited to the first N sizes.
    pub zoom: Option<usize>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Score ratio by array size".to_string(),
            y_label: "ratio".to_string(),
            width: 1000,
            height: 600,
            zoom: None,
        }
    }
}

/// Render the report as an SVG document.
pub fn ratio_chart_svg(report: &RatioReport, options: &ChartOptions) -> Result<String> {
    let drawable: Vec<&OperationSeries> = report
        .series()
        .iter()
        .filter(|s| s.points.iter().any(|p| p.size > 0))
        .collect();
    if drawable.is_empty() {
        return Err(ChartError::NoData);
    }
    let missing = missing_labels(report);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        match options.zoom {
            Some(limit) if limit > 0 => {
                let panels = root.split_evenly((2, 1));
                draw_panel(&panels[0], &drawable, &missing, usize::MAX, &options.title, options)?;
                let caption = format!("{} (first {} sizes)", options.title, limit);
                draw_panel(&panels[1], &drawable, &missing, limit, &caption, options)?;
            }
            _ => draw_panel(&root, &drawable, &missing, usize::MAX, &options.title, options)?,
        }

        root.present().map_err(drawing)?;
    }

    debug!(operations = drawable.len(), bytes = svg.len(), "rendered ratio chart");
    Ok(svg)
}

/// Render the report and write it to `path`.
pub fn write_ratio_chart(report: &RatioReport, path: impl AsRef<Path>, options: &ChartOptions) -> Result<()> {
    let svg = ratio_chart_svg(report, options)?;
    write_report(path, &svg)?;
    Ok(())
}

/// Legend labels for operations that have no drawable point.
fn missing_labels(report: &RatioReport) -> Vec<String> {
    let no_data = report
        .series()
        .iter()
        .filter(|s| !s.points.iter().any(|p| p.size > 0))
        .map(|s| format!("{} (no data)", s.operation));
    let failed = report
        .failures()
        .iter()
        .map(|f| format!("{} (failed)", f.operation));
    no_data.chain(failed).collect()
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    series: &[&OperationSeries],
    missing: &[String],
    limit: usize,
    caption: &str,
    options: &ChartOptions,
) -> Result<()> {
    let lines: Vec<(&str, Vec<(f64, f64)>)> = series
        .iter()
        .map(|s| {
            let data = s
                .points
                .iter()
                .filter(|p| p.size > 0)
                .take(limit)
                .map(|p| ((p.size as f64).log2(), p.ratio))
                .collect();
            (s.operation.as_str(), data)
        })
        .collect();

    let xs = lines.iter().flat_map(|(_, data)| data.iter().map(|(x, _)| *x));
    let x_min = xs.clone().fold(f64::INFINITY, f64::min);
    let x_max = xs.fold(f64::NEG_INFINITY, f64::max);
    let y_max = lines
        .iter()
        .flat_map(|(_, data)| data.iter().map(|(_, y)| *y))
        .filter(|y| y.is_finite())
        .fold(1.0_f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min - 0.5)..(x_max + 0.5), 0.0..y_max)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_labels(((x_max - x_min) as usize + 2).min(32))
        .x_label_formatter(&size_tick)
        .x_desc("Array size (elements, log2)")
        .y_desc(options.y_label.as_str())
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(drawing)?;

    for (i, (operation, data)) in lines.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];

        chart
            .draw_series(LineSeries::new(data.clone(), color.stroke_width(2)))
            .map_err(drawing)?
            .label(*operation)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .draw_series(PointSeries::of_element(
                data.clone(),
                4,
                color.filled(),
                &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
            ))
            .map_err(drawing)?;
    }

    for label in missing {
        chart
            .draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), MISSING_COLOR.stroke_width(2)))
            .map_err(drawing)?
            .label(label.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MISSING_COLOR.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing)?;

    Ok(())
}

/// Label integral exponents with the size they stand for.
fn size_tick(x: &f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    format!("{}", 2f64.powf(rounded) as u64)
}

fn drawing<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Drawing(err.to_string())
}
