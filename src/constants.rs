//! Application constants for the fluid chart tool
//!
//! This module contains the marker substrings, timestamp format, default
//! file names, axis bounds and frame column names used throughout the crate.

// =============================================================================
// Section Markers
// =============================================================================

/// Marker substrings that switch the active section of a clinical log.
///
/// Matching is case-sensitive and tested in the order sodium, urine,
/// desmopressin; the first match wins.
pub mod markers {
    pub const SODIUM: &str = "SODIUM LEVEL";
    pub const URINE_VOIDED: &str = "Urine Voided Volume";
    pub const URINE_OUTPUT: &str = "Urine Output";
    pub const DESMOPRESSIN: &str = "desmopressin";

    /// Both urine spellings found in nursing exports
    pub const URINE: &[&str] = &[URINE_VOIDED, URINE_OUTPUT];
}

// =============================================================================
// Timestamp Formats
// =============================================================================

/// Format of the joined date and time tokens of a data line (24-hour clock)
pub const LOG_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Format used when timestamps are handed to the chart layer
pub const CHART_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Defaults
// =============================================================================

/// Input log read when neither the CLI nor a config file names one
pub const DEFAULT_INPUT_FILE: &str = "moredata.txt";

/// Chart written when neither the CLI nor a config file names one
pub const DEFAULT_OUTPUT_FILE: &str = "urine_output_plot.html";

/// Sodium axis bounds in mEq/L
pub const DEFAULT_SODIUM_AXIS_MIN: f64 = 130.0;
pub const DEFAULT_SODIUM_AXIS_MAX: f64 = 160.0;

/// Width in pixels of the desmopressin dose lines
pub const DEFAULT_DOSE_LINE_WIDTH: f64 = 2.0;

/// Script tag source for plotly.js in rendered pages
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

// =============================================================================
// Column Name Constants
// =============================================================================

/// Column names of the per-category data frames
pub mod columns {
    pub const DATE: &str = "Date";
    pub const LEVEL: &str = "Level";
    pub const VOLUME: &str = "Volume";
    pub const DOSE: &str = "Dose";
}

// =============================================================================
// Helper Functions
// =============================================================================

/// File name for an exported frame, e.g. `sodium.csv`
pub fn get_export_filename(category_slug: &str, extension: &str) -> String {
    format!("{}.{}", category_slug, extension)
}
