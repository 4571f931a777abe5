//! Tabular views of the extracted series.
//!
//! Each category becomes a two-column polars frame (`Date` plus `Level`,
//! `Volume` or `Dose`) that can be exported as CSV or Parquet.

use crate::constants::{columns, get_export_filename};
use crate::error::{ChartError, Result};
use crate::models::{Category, ClinicalSeries, TimeSeries};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported frame export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Parquet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

/// Build the frame for one category's series
pub fn series_to_frame(category: Category, series: &TimeSeries) -> Result<DataFrame> {
    let frame = DataFrame::new(vec![
        Column::new(columns::DATE.into(), series.timestamps()),
        Column::new(category.value_column().into(), series.values()),
    ])?;
    Ok(frame)
}

/// Frames for all three categories, in marker priority order
pub fn build_frames(series: &ClinicalSeries) -> Result<Vec<(Category, DataFrame)>> {
    Category::ALL
        .into_iter()
        .map(|category| Ok((category, series_to_frame(category, series.get(category))?)))
        .collect()
}

/// Write every category frame into `output_dir`, returning the files written
pub fn export_frames(
    series: &ClinicalSeries,
    output_dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for (category, mut frame) in build_frames(series)? {
        let path = output_dir.join(get_export_filename(category.slug(), format.extension()));
        write_frame(&mut frame, &path, format)?;
        debug!("Wrote {} rows to {}", frame.height(), path.display());
        written.push(path);
    }

    info!(
        "Exported {} frames to {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

fn write_frame(frame: &mut DataFrame, path: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(path)?;
    let outcome = match format {
        ExportFormat::Csv => CsvWriter::new(file).include_header(true).finish(frame),
        ExportFormat::Parquet => ParquetWriter::new(file).finish(frame).map(|_| ()),
    };

    outcome.map_err(|e| ChartError::Export {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
