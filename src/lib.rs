//! Fluid Chart Library
//!
//! A Rust library for turning flat-text clinical logs into time series and
//! interactive charts for correlating fluid balance with sodium levels.
//!
//! This library provides tools for:
//! - Routing log lines into sodium, urine and desmopressin sections by marker
//! - Extracting timestamped values with an explicit skip policy for noisy lines
//! - Building polars frames and exporting them to CSV or Parquet
//! - Rendering a multi-axis plotly.js chart as a standalone HTML page
//!
//! ## Usage
//!
//! ```no_run
//! use fluid_chart::{ChartConfig, build_figure, read_clinical_log, write_html};
//! use std::path::Path;
//!
//! # fn example() -> fluid_chart::Result<()> {
//! let parsed = read_clinical_log(Path::new("moredata.txt"))?;
//! let figure = build_figure(&parsed.series, &ChartConfig::default());
//! write_html(&figure, Path::new("urine_output_plot.html"))?;
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod frames;
pub mod models;
pub mod reader;

// Re-export commonly used types
pub use chart::{Figure, build_figure, render_html, write_html};
pub use classifier::{classify_lines, classify_text};
pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use extractor::{extract_series, parse_record};
pub use models::{
    Category, ClinicalSeries, ExtractionStats, ParsedLog, RawSections, Record, SkipReason,
    TimeSeries,
};
pub use reader::{parse_clinical_text, read_clinical_log};
