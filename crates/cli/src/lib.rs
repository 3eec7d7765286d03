//! CLI for benchratio.
//!
//! This crate provides the `benchratio` command: ratio tables and charts
//! between baseline and comparison benchmarks, raw score tables, and the
//! effective configuration.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod settings;

use anyhow::{bail, Context, Result};
use benchratio_core::{align, Direction, RatioReport, RecordError, ScoreMatrix};
use benchratio_report::{chart, io, load_index, load_records, markdown, ChartOptions, TableOptions};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use settings::Settings;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// benchratio CLI.
#[derive(Parser, Debug)]
#[command(name = "benchratio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./benchratio.toml when present).
    #[arg(long, global = true, env = "BENCHRATIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare baseline and comparison variants as a ratio per array size.
    ///
    /// Benchmarks are paired by name: `<prefix><operation><suffix>`. With a
    /// single results file both variants are read from it.
    Ratio(RatioArgs),

    /// Print raw scores per array size, one column per results file.
    Scores(ScoresArgs),

    /// Show the effective configuration.
    Config,
}

/// Output format of the `ratio` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown table grouped by array size.
    Table,
    /// SVG line chart on a log2 size axis.
    Chart,
}

/// Arguments of the `ratio` command.
#[derive(Args, Debug)]
pub struct RatioArgs {
    /// JMH JSON results holding the baseline variant.
    #[arg(short, long)]
    pub baseline: PathBuf,

    /// JMH JSON results holding the comparison variant (defaults to --baseline).
    #[arg(long)]
    pub comparison: Option<PathBuf>,

    /// Operations to compare, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub ops: Vec<String>,

    /// Identifier prefix of baseline benchmarks.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Identifier prefix of comparison benchmarks (defaults to --prefix).
    #[arg(long)]
    pub comparison_prefix: Option<String>,

    /// Variant suffix of baseline benchmarks.
    #[arg(long)]
    pub baseline_suffix: Option<String>,

    /// Variant suffix of comparison benchmarks.
    #[arg(long)]
    pub comparison_suffix: Option<String>,

    /// Ratio direction: comparison-over-baseline or baseline-over-comparison.
    #[arg(short, long)]
    pub direction: Option<Direction>,

    /// Benchmark parameter holding the array size (ARRAY_LENGTH or array_size).
    #[arg(long)]
    pub size_key: Option<String>,

    /// Reject results that measure the same size twice.
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output file (tables default to stdout, charts to ratio.svg).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Add a chart panel restricted to the first N sizes.
    #[arg(long)]
    pub zoom: Option<usize>,

    /// Width in bytes of one array element.
    #[arg(long)]
    pub element_bytes: Option<u64>,

    /// Exit with an error when any operation could not be compared.
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments of the `scores` command.
#[derive(Args, Debug)]
pub struct ScoresArgs {
    /// JMH JSON results files, one score column each.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Column labels, in file order (defaults to file names).
    #[arg(short, long)]
    pub label: Vec<String>,

    /// Benchmark parameter holding the array size.
    #[arg(long)]
    pub size_key: Option<String>,

    /// Score unit shown in column headers.
    #[arg(long, default_value = "ns/op")]
    pub unit: String,

    /// Width in bytes of one array element.
    #[arg(long)]
    pub element_bytes: Option<u64>,

    /// Output file (defaults to stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RatioArgs {
    /// Apply command-line overrides on top of loaded settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if !self.ops.is_empty() {
            settings.operations = self.ops.clone();
        }
        if let Some(prefix) = &self.prefix {
            settings.prefix = prefix.clone();
        }
        if let Some(prefix) = &self.comparison_prefix {
            settings.comparison_prefix = Some(prefix.clone());
        }
        if let Some(suffix) = &self.baseline_suffix {
            settings.baseline_suffix = suffix.clone();
        }
        if let Some(suffix) = &self.comparison_suffix {
            settings.comparison_suffix = suffix.clone();
        }
        if let Some(direction) = self.direction {
            settings.direction = direction;
        }
        if let Some(key) = &self.size_key {
            settings.size_key = key.clone();
        }
        if let Some(bytes) = self.element_bytes {
            settings.element_bytes = bytes;
        }
        settings.strict |= self.strict;
        settings
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli)
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Ratio(args) => run_ratio(&args, args.apply(settings)),
        Commands::Scores(args) => run_scores(&args, settings),
        Commands::Config => {
            let rendered = toml::to_string_pretty(&settings).context("Failed to render configuration")?;
            println!("{}", "benchratio configuration".bold());
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            print!("{}", rendered);
            Ok(())
        }
    }
}

fn run_ratio(args: &RatioArgs, settings: Settings) -> Result<()> {
    let options = settings.index_options();
    let baseline = load_index(&args.baseline, &options)?;
    let comparison = match &args.comparison {
        Some(path) => Some(load_index(path, &options)?),
        None => None,
    };

    let spec = settings.align_spec();
    let report = align(
        &settings.operations,
        &baseline,
        comparison.as_ref().unwrap_or(&baseline),
        &spec,
    );

    for failure in report.failures() {
        warn!(operation = %failure.operation, "{}", failure.error);
    }
    for operation in report.no_data() {
        warn!(operation = %operation, "no array size measured on both sides");
    }
    info!(
        aligned = report.series().len(),
        failed = report.failures().len(),
        "aligned operations"
    );

    match args.format {
        OutputFormat::Table => {
            let table = markdown::ratio_table(
                &report,
                &spec.ratio_label(),
                &TableOptions {
                    element_bytes: settings.element_bytes,
                    title: Some(format!("Ratio {}", spec.ratio_label())),
                    generated: Some(Utc::now()),
                },
            );
            emit(&table, args.output.as_deref())?;
        }
        OutputFormat::Chart => {
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("ratio.svg"));
            let options = ChartOptions {
                title: format!("Ratio of time per operation {}", spec.ratio_label()),
                y_label: spec.ratio_label(),
                zoom: args.zoom,
                ..ChartOptions::default()
            };
            chart::write_ratio_chart(&report, &path, &options)
                .with_context(|| format!("Failed to write chart {}", path.display()))?;
            println!("Chart written to {}", path.display());
        }
    }

    if let Some(summary) = missing_summary(&report) {
        eprintln!("{} {}", "warning:".yellow().bold(), summary);
    }
    if !report.failures().is_empty() {
        if args.fail_fast {
            bail!(
                "operations failed: {}",
                report
                    .failures()
                    .iter()
                    .map(|f| f.operation.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    Ok(())
}

/// One line naming every operation without ratios, or `None` when all have some.
fn missing_summary(report: &RatioReport) -> Option<String> {
    let mut missing: Vec<String> = report
        .failures()
        .iter()
        .map(|f| format!("{} (failed: {})", f.operation, f.error))
        .collect();
    missing.extend(report.no_data().into_iter().map(|op| format!("{} (no data)", op)));

    if missing.is_empty() {
        return None;
    }
    let total = report.series().len() + report.failures().len();
    Some(format!(
        "{} of {} operations have no ratios: {}",
        missing.len(),
        total,
        missing.join(", ")
    ))
}

fn run_scores(args: &ScoresArgs, settings: Settings) -> Result<()> {
    let size_key = args.size_key.clone().unwrap_or(settings.size_key);
    let runs = args
        .files
        .iter()
        .map(load_records)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let slices: Vec<&[_]> = runs.iter().map(Vec::as_slice).collect();
    let matrix = ScoreMatrix::build(&slices, &size_key).map_err(|err| {
        let file = match &err {
            RecordError::InRun { run, .. } => args.files.get(*run),
            _ => None,
        };
        match file {
            Some(path) => anyhow::Error::new(err)
                .context(format!("Invalid benchmark results in {}", path.display())),
            None => anyhow::Error::new(err).context("Invalid benchmark results"),
        }
    })?;

    let labels = if args.label.is_empty() {
        args.files.iter().map(|path| file_label(path)).collect()
    } else {
        args.label.clone()
    };

    let table = markdown::score_table(
        &matrix,
        &labels,
        &args.unit,
        &TableOptions {
            element_bytes: args.element_bytes.unwrap_or(settings.element_bytes),
            ..TableOptions::default()
        },
    );
    emit(&table, args.output.as_deref())
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn emit(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            io::write_report(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{}", contents),
    }
    Ok(())
}
