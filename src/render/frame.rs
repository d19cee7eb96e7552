use serde::{Deserialize, Serialize};

use crate::core::{AxisMarker, AxisScale, PixelPoint, Viewport};
use crate::error::{ChartError, ChartResult};

/// Markers of one axis together with the scale they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub title: String,
    pub scale: AxisScale,
    pub markers: Vec<AxisMarker>,
}

/// Projected polyline of one y series plus its own vertical axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub title: String,
    pub stroke_width: u32,
    pub y_axis: AxisFrame,
    pub points: Vec<PixelPoint>,
}

/// Summary line of the legend table.
///
/// Rows built from a series carry `last_or_diff` (latest sample, or latest
/// minus first for `last-is-diff` series); caller-supplied rows leave it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub title: String,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub last_or_diff: Option<f64>,
    #[serde(default)]
    pub comment: String,
}

impl LegendRow {
    #[must_use]
    pub fn new(title: impl Into<String>, average: f64, min: f64, max: f64) -> Self {
        Self {
            title: title.into(),
            average,
            min,
            max,
            last_or_diff: None,
            comment: String::new(),
        }
    }
}

/// Legend line of the x series: its title, first and last label, sample count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XLegend {
    pub title: String,
    pub first: String,
    pub last: String,
    pub count: usize,
    #[serde(default)]
    pub comment: String,
}

/// Everything a renderer needs to draw one chart; no numeric decisions remain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub viewport: Viewport,
    pub axis_area_width: u32,
    pub title: String,
    pub x_axis: AxisFrame,
    pub series: Vec<SeriesFrame>,
    pub legend: Vec<LegendRow>,
    pub x_legend: XLegend,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ChartFrame {
    /// Usable plot height below which the x-axis labels live.
    #[must_use]
    pub fn plot_bottom(&self) -> f64 {
        self.viewport.usable_height(self.axis_area_width)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        validate_axis(&self.x_axis)?;
        for series in &self.series {
            validate_axis(&series.y_axis)?;
            if let Some(point) = series
                .points
                .iter()
                .find(|point| !point.x.is_finite() || !point.y.is_finite())
            {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has a non-finite point ({}, {})",
                    series.title, point.x, point.y
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.x_axis.markers.len()
            + self
                .series
                .iter()
                .map(|series| series.y_axis.markers.len())
                .sum::<usize>()
    }
}

fn validate_axis(axis: &AxisFrame) -> ChartResult<()> {
    if axis.markers.iter().any(|marker| !marker.position.is_finite()) {
        return Err(ChartError::InvalidData(format!(
            "axis `{}` has a non-finite marker position",
            axis.title
        )));
    }
    Ok(())
}
