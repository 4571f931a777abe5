//! Configuration management and validation.
//!
//! Provides the chart configuration: input and output locations, titles,
//! trace styling and the sodium axis range. Values come from defaults, an
//! optional JSON file, and finally CLI overrides.

use crate::constants::{
    DEFAULT_DOSE_LINE_WIDTH, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_SODIUM_AXIS_MAX,
    DEFAULT_SODIUM_AXIS_MIN,
};
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Colours available for chart traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceColor {
    Red,
    Green,
    Blue,
    Orange,
    Purple,
    Black,
    Gray,
}

impl TraceColor {
    /// CSS colour name understood by plotly.js
    pub fn as_css(&self) -> &'static str {
        match self {
            TraceColor::Red => "red",
            TraceColor::Green => "green",
            TraceColor::Blue => "blue",
            TraceColor::Orange => "orange",
            TraceColor::Purple => "purple",
            TraceColor::Black => "black",
            TraceColor::Gray => "gray",
        }
    }
}

/// Line dash styles for the dose reference lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl LineDash {
    /// Dash name understood by plotly.js
    pub fn as_plotly(&self) -> &'static str {
        match self {
            LineDash::Solid => "solid",
            LineDash::Dash => "dash",
            LineDash::Dot => "dot",
            LineDash::DashDot => "dashdot",
        }
    }
}

/// Closed numeric range of an axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.min, self.max]
    }
}

/// Chart titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTitles {
    pub chart: String,
    pub x_axis: String,
    pub urine_axis: String,
    pub sodium_axis: String,
}

impl Default for ChartTitles {
    fn default() -> Self {
        Self {
            chart: "Urine Output, Desmopressin Dose, and Sodium Levels Over Time".to_string(),
            x_axis: "Date".to_string(),
            urine_axis: "Urine Volume (mL)".to_string(),
            sodium_axis: "Sodium Level".to_string(),
        }
    }
}

/// Styling of the three chart traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceStyle {
    /// Urine trace colour; `None` leaves it to the plotly palette
    pub urine_color: Option<TraceColor>,
    pub sodium_color: TraceColor,
    pub dose_color: TraceColor,
    pub dose_dash: LineDash,
    pub dose_line_width: f64,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            urine_color: None,
            sodium_color: TraceColor::Green,
            dose_color: TraceColor::Red,
            dose_dash: LineDash::Dash,
            dose_line_width: DEFAULT_DOSE_LINE_WIDTH,
        }
    }
}

/// Complete chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Clinical log to read
    pub input_path: PathBuf,

    /// HTML file the chart is written to
    pub output_path: PathBuf,

    pub titles: ChartTitles,

    pub style: TraceStyle,

    /// Fixed range of the secondary (sodium) axis
    pub sodium_axis_range: AxisRange,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            titles: ChartTitles::default(),
            style: TraceStyle::default(),
            sodium_axis_range: AxisRange::new(DEFAULT_SODIUM_AXIS_MIN, DEFAULT_SODIUM_AXIS_MAX),
        }
    }
}

impl ChartConfig {
    /// Load a configuration from a JSON file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ChartError::Configuration {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: ChartConfig = serde_json::from_str(&content)?;
        debug!("Loaded chart configuration from {}", path.display());

        config.validate()?;
        Ok(config)
    }

    /// Override the input log location
    pub fn with_input_path(mut self, path: PathBuf) -> Self {
        self.input_path = path;
        self
    }

    /// Override the chart output location
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    /// Check that the configuration can produce a sensible chart
    pub fn validate(&self) -> Result<()> {
        let range = self.sodium_axis_range;
        if !range.min.is_finite() || !range.max.is_finite() {
            return Err(ChartError::Configuration {
                message: "Sodium axis range must be finite".to_string(),
            });
        }
        if range.min >= range.max {
            return Err(ChartError::Configuration {
                message: format!(
                    "Sodium axis range is inverted or empty: [{}, {}]",
                    range.min, range.max
                ),
            });
        }

        let width = self.style.dose_line_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::Configuration {
                message: format!("Dose line width must be positive, got {}", width),
            });
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ChartError::Configuration {
                message: "Output path must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
