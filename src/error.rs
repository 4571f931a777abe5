//! Error handling for clinical log processing.
//!
//! Covers the file-level failures only. Malformed data lines are not errors;
//! they are reported as [`crate::models::SkipReason`] values instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input log not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Chart rendering failed for file: {path} - {reason}")]
    Render { path: PathBuf, reason: String },

    #[error("Frame export failed for file: {path} - {reason}")]
    Export { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ChartError>;
