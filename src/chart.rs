//! Chart construction from extracted clinical series.
//!
//! Builds a figure in plotly.js's JSON schema and renders it into a
//! standalone HTML page. The figure has three layers:
//! - urine volume as a line-and-marker series on the primary axis
//! - sodium level as grouped bars on a secondary axis with a fixed range
//! - one dashed vertical line per desmopressin dose, from zero to the
//!   largest urine volume

use crate::config::ChartConfig;
use crate::constants::{CHART_DATETIME_FORMAT, PLOTLY_CDN_URL};
use crate::error::{ChartError, Result};
use crate::models::ClinicalSeries;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the urine trace in the legend
pub const URINE_TRACE_NAME: &str = "Urine Voided Volume";

/// Name of the sodium trace in the legend
pub const SODIUM_TRACE_NAME: &str = "Sodium Level";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Trace {
    fn new(kind: TraceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            x: Vec::new(),
            y: Vec::new(),
            name: name.into(),
            mode: None,
            hoverinfo: None,
            marker: None,
            line: None,
            yaxis: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
    pub dash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl Axis {
    fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
            overlaying: None,
            side: None,
            range: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub yaxis2: Axis,
    pub hovermode: String,
    pub barmode: String,
}

fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(CHART_DATETIME_FORMAT).to_string()
}

/// Shortest round-trip form of a dose: `2.0`, `0.25`, `1e-05`, `1e+16`, `nan`.
///
/// Integral values keep their decimal point and exponents carry a sign and at
/// least two digits.
pub fn format_dose(dose: f64) -> String {
    if dose.is_nan() {
        return "nan".to_string();
    }

    let repr = format!("{:?}", dose);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Legend label for a dose line
pub fn dose_label(dose: f64) -> String {
    format!("Desmopressin {} microgram", format_dose(dose))
}

/// Assemble the figure for one clinical log
pub fn build_figure(series: &ClinicalSeries, config: &ChartConfig) -> Figure {
    let style = &config.style;
    let mut data = Vec::with_capacity(2 + series.desmopressin.len());

    let mut urine = Trace::new(TraceKind::Scatter, URINE_TRACE_NAME);
    urine.x = series.urine.timestamps().iter().map(format_timestamp).collect();
    urine.y = series.urine.values().to_vec();
    urine.mode = Some("markers+lines".to_string());
    urine.hoverinfo = Some("y+x".to_string());
    urine.marker = style.urine_color.map(|color| Marker {
        color: color.as_css().to_string(),
    });
    data.push(urine);

    let mut sodium = Trace::new(TraceKind::Bar, SODIUM_TRACE_NAME);
    sodium.x = series.sodium.timestamps().iter().map(format_timestamp).collect();
    sodium.y = series.sodium.values().to_vec();
    sodium.marker = Some(Marker {
        color: style.sodium_color.as_css().to_string(),
    });
    sodium.yaxis = Some("y2".to_string());
    data.push(sodium);

    match series.urine.max_value() {
        Some(top) => {
            for record in series.desmopressin.iter() {
                let x = format_timestamp(&record.timestamp);
                let mut dose = Trace::new(TraceKind::Scatter, dose_label(record.value));
                dose.x = vec![x.clone(), x];
                dose.y = vec![0.0, top];
                dose.mode = Some("lines".to_string());
                dose.line = Some(Line {
                    color: style.dose_color.as_css().to_string(),
                    width: style.dose_line_width,
                    dash: style.dose_dash.as_plotly().to_string(),
                });
                data.push(dose);
            }
        }
        None if !series.desmopressin.is_empty() => {
            warn!(
                "No urine volumes to scale against; omitting {} desmopressin dose lines",
                series.desmopressin.len()
            );
        }
        None => {}
    }

    let titles = &config.titles;
    let layout = Layout {
        title: Title::new(titles.chart.clone()),
        xaxis: Axis::titled(titles.x_axis.clone()),
        yaxis: Axis::titled(titles.urine_axis.clone()),
        yaxis2: Axis {
            title: Title::new(titles.sodium_axis.clone()),
            overlaying: Some("y".to_string()),
            side: Some("right".to_string()),
            range: Some(config.sodium_axis_range.as_array()),
        },
        hovermode: "closest".to_string(),
        barmode: "group".to_string(),
    };

    debug!("Built figure with {} traces", data.len());
    Figure { data, layout }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a figure into a self-contained HTML page
pub fn render_html(figure: &Figure) -> Result<String> {
    // "</" inside the inline script would close the tag early
    let json = serde_json::to_string(figure)?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
const figure = {json};
Plotly.newPlot("chart", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        title = escape_html(&figure.layout.title.text),
        cdn = PLOTLY_CDN_URL,
        json = json,
    ))
}

/// Render a figure and write it to `path`
pub fn write_html(figure: &Figure, path: &Path) -> Result<()> {
    let html = render_html(figure)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ChartError::Render {
            path: path.to_path_buf(),
            reason: format!("Failed to create output directory: {}", e),
        })?;
    }

    std::fs::write(path, html).map_err(|e| ChartError::Render {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!("Wrote chart to {}", path.display());
    Ok(())
}
