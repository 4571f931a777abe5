//! Core data structures and types for clinical log processing.
//!
//! Defines the log categories, the raw sections produced by the classifier,
//! the time series produced by the extractor, and the statistics that make
//! the skip policy observable.

use crate::constants::{columns, markers};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data categories found in a clinical log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sodium,
    Urine,
    Desmopressin,
}

impl Category {
    /// All categories in marker priority order
    pub const ALL: [Category; 3] = [Category::Sodium, Category::Urine, Category::Desmopressin];

    /// Detect a section marker in a trimmed line.
    ///
    /// Sodium is tested first, then urine, then desmopressin, so a line
    /// containing several marker substrings resolves to the earliest one.
    pub fn from_marker_line(line: &str) -> Option<Self> {
        if line.contains(markers::SODIUM) {
            Some(Category::Sodium)
        } else if markers::URINE.iter().any(|marker| line.contains(marker)) {
            Some(Category::Urine)
        } else if line.contains(markers::DESMOPRESSIN) {
            Some(Category::Desmopressin)
        } else {
            None
        }
    }

    /// Lowercase identifier used for file names
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Sodium => "sodium",
            Category::Urine => "urine",
            Category::Desmopressin => "desmopressin",
        }
    }

    /// Human-readable name for reports
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sodium => "Sodium level",
            Category::Urine => "Urine volume",
            Category::Desmopressin => "Desmopressin dose",
        }
    }

    /// Unit of the recorded values
    pub fn unit(&self) -> &'static str {
        match self {
            Category::Sodium => "mEq/L",
            Category::Urine => "mL",
            Category::Desmopressin => "mcg",
        }
    }

    /// Name of the value column in this category's data frame
    pub fn value_column(&self) -> &'static str {
        match self {
            Category::Sodium => columns::LEVEL,
            Category::Urine => columns::VOLUME,
            Category::Desmopressin => columns::DOSE,
        }
    }
}

/// Raw data lines grouped by the most recent section marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSections {
    pub sodium: Vec<String>,
    pub urine: Vec<String>,
    pub desmopressin: Vec<String>,
}

impl RawSections {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Sodium => &self.sodium,
            Category::Urine => &self.urine,
            Category::Desmopressin => &self.desmopressin,
        }
    }

    pub(crate) fn push(&mut self, category: Category, line: String) {
        match category {
            Category::Sodium => self.sodium.push(line),
            Category::Urine => self.urine.push(line),
            Category::Desmopressin => self.desmopressin.push(line),
        }
    }

    /// Total number of data lines across all sections
    pub fn total_lines(&self) -> usize {
        self.sodium.len() + self.urine.len() + self.desmopressin.len()
    }
}

/// One successfully parsed data line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Why a data line contributed nothing to its series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("line is empty")]
    Empty,

    #[error("missing time token")]
    MissingTime,

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("missing value token")]
    MissingValue,

    #[error("invalid value '{0}'")]
    InvalidValue(String),
}

/// Parallel timestamp and value sequences for one category.
///
/// Both sequences always have the same length; records are kept in the order
/// they were encountered, not sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.timestamps.push(record.timestamp);
        self.values.push(record.value);
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Iterate over records in encounter order
    pub fn iter(&self) -> impl Iterator<Item = Record> + '_ {
        self.timestamps
            .iter()
            .zip(&self.values)
            .map(|(&timestamp, &value)| Record { timestamp, value })
    }

    /// Largest value, ignoring NaN; `None` for an empty series
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Smallest value, ignoring NaN; `None` for an empty series
    pub fn min_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
    }
}

impl FromIterator<Record> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut series = TimeSeries::new();
        for record in iter {
            series.push(record);
        }
        series
    }
}

/// The three series extracted from one clinical log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalSeries {
    pub sodium: TimeSeries,
    pub urine: TimeSeries,
    pub desmopressin: TimeSeries,
}

impl ClinicalSeries {
    pub fn get(&self, category: Category) -> &TimeSeries {
        match category {
            Category::Sodium => &self.sodium,
            Category::Urine => &self.urine,
            Category::Desmopressin => &self.desmopressin,
        }
    }

    pub fn total_records(&self) -> usize {
        self.sodium.len() + self.urine.len() + self.desmopressin.len()
    }
}

/// Extraction statistics for one category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionStats {
    /// Raw lines handed to the extractor
    pub lines_seen: usize,
    /// Lines that produced a record
    pub records_parsed: usize,
    /// Zero-based position within the section, with the reason it was dropped
    pub skipped: Vec<(usize, SkipReason)>,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_skipped(&self) -> usize {
        self.skipped.len()
    }
}

/// Result of parsing a whole clinical log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    pub series: ClinicalSeries,
    pub sodium_stats: ExtractionStats,
    pub urine_stats: ExtractionStats,
    pub desmopressin_stats: ExtractionStats,
}

impl ParsedLog {
    pub fn stats(&self, category: Category) -> &ExtractionStats {
        match category {
            Category::Sodium => &self.sodium_stats,
            Category::Urine => &self.urine_stats,
            Category::Desmopressin => &self.desmopressin_stats,
        }
    }
}
