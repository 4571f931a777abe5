//! Entry point for turning a clinical log into time series.
//!
//! Reads the whole file into memory, classifies its lines into sections and
//! extracts one series per category.

use crate::classifier::classify_text;
use crate::error::{ChartError, Result};
use crate::extractor::extract_series;
use crate::models::{Category, ParsedLog};
use std::path::Path;
use tracing::{debug, info};

/// Read and parse a clinical log file.
///
/// A missing file is reported as [`ChartError::InputNotFound`]; any other
/// read failure as [`ChartError::Io`]. Malformed lines never fail the read.
pub fn read_clinical_log(path: &Path) -> Result<ParsedLog> {
    info!("Reading clinical log: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ChartError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => ChartError::Io(e),
    })?;

    let parsed = parse_clinical_text(&content);

    info!(
        "Parsed {} records ({} sodium, {} urine, {} desmopressin)",
        parsed.series.total_records(),
        parsed.series.sodium.len(),
        parsed.series.urine.len(),
        parsed.series.desmopressin.len()
    );

    Ok(parsed)
}

/// Parse an in-memory clinical log
pub fn parse_clinical_text(content: &str) -> ParsedLog {
    let sections = classify_text(content);
    debug!(
        "Classified {} data lines ({} sodium, {} urine, {} desmopressin)",
        sections.total_lines(),
        sections.sodium.len(),
        sections.urine.len(),
        sections.desmopressin.len()
    );

    let mut parsed = ParsedLog::default();
    for category in Category::ALL {
        let (series, stats) = extract_series(sections.get(category));
        if stats.records_skipped() > 0 {
            debug!(
                "{:?}: skipped {} of {} lines",
                category,
                stats.records_skipped(),
                stats.lines_seen
            );
        }

        match category {
            Category::Sodium => {
                parsed.series.sodium = series;
                parsed.sodium_stats = stats;
            }
            Category::Urine => {
                parsed.series.urine = series;
                parsed.urine_stats = stats;
            }
            Category::Desmopressin => {
                parsed.series.desmopressin = series;
                parsed.desmopressin_stats = stats;
            }
        }
    }

    parsed
}
