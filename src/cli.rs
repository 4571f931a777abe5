//! Command-line interface components.

use crate::chart::{build_figure, write_html};
use crate::config::ChartConfig;
use crate::frames::{ExportFormat, export_frames};
use crate::models::{Category, ParsedLog};
use crate::reader::read_clinical_log;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "fluid_chart")]
#[command(about = "Chart sodium levels, urine output and desmopressin doses from a clinical log")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Clinical log to read (defaults to the config file value, then moredata.txt)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// HTML file for the chart
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON chart configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also export the parsed series as one table per category into this directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Table format used with --export-dir
    #[arg(long, value_enum, default_value = "csv")]
    pub export_format: ExportFormat,

    /// Parse and report only; do not write the chart
    #[arg(long)]
    pub summary_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the effective configuration: defaults, then file, then flags
    pub fn resolve_config(&self) -> Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ChartConfig::default(),
        };

        if let Some(input) = &self.input {
            config = config.with_input_path(input.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_output_path(output.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Outcome of one run, used for the final report
#[derive(Debug)]
pub struct RunSummary {
    pub parsed: ParsedLog,
    pub chart_path: Option<PathBuf>,
    pub exported: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fluid_chart={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

/// Parse the log, then write the chart and any requested exports
pub fn run(args: &Args) -> Result<RunSummary> {
    let start_time = Instant::now();
    let config = args.resolve_config()?;

    let parsed = read_clinical_log(&config.input_path)
        .with_context(|| format!("Failed to read {}", config.input_path.display()))?;

    let exported = match &args.export_dir {
        Some(dir) => export_frames(&parsed.series, dir, args.export_format)
            .with_context(|| format!("Failed to export tables to {}", dir.display()))?,
        None => Vec::new(),
    };

    let chart_path = if args.summary_only {
        None
    } else {
        let figure = build_figure(&parsed.series, &config);
        write_html(&figure, &config.output_path)?;
        Some(config.output_path.clone())
    };

    Ok(RunSummary {
        parsed,
        chart_path,
        exported,
        elapsed: start_time.elapsed(),
    })
}

fn format_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{} - {}", min, max),
        _ => "-".to_string(),
    }
}

/// Category label padded before colouring so escape codes do not count toward the width
fn summary_label(category: Category) -> String {
    format!("{:<18}", format!("{}:", category.label()))
}

/// Print a coloured per-category report to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", "Clinical log summary".bright_green().bold());

    for category in Category::ALL {
        let series = summary.parsed.series.get(category);
        let stats = summary.parsed.stats(category);

        let skipped = if stats.records_skipped() > 0 {
            stats.records_skipped().to_string().bright_red()
        } else {
            "0".normal()
        };

        println!(
            "  {} {} parsed, {} skipped, range {} {}",
            summary_label(category).bright_cyan(),
            series.len().to_string().bright_white().bold(),
            skipped,
            format_range(series.min_value(), series.max_value()),
            category.unit().bright_black()
        );
    }

    if let Some(path) = &summary.chart_path {
        println!("  {} {}", "Chart:".bright_cyan(), path.display());
    }
    for path in &summary.exported {
        println!("  {} {}", "Table:".bright_cyan(), path.display());
    }

    println!(
        "  {} {:.1}ms",
        "Elapsed:".bright_cyan(),
        summary.elapsed.as_secs_f64() * 1000.0
    );
}
