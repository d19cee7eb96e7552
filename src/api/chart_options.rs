use serde::{Deserialize, Serialize};

use crate::core::axis_scale::{DEFAULT_X_MAX_MARKERS, DEFAULT_Y_MAX_MARKERS};
use crate::core::range_selector::{
    DEFAULT_MAX_AVERAGE_QUOTIENT, DEFAULT_SPREAD_FACTOR, DEFAULT_SPREAD_RANGE,
};
use crate::core::resampler::DEFAULT_MOVING_AVERAGE_SPAN;
use crate::core::{RangeSelector, Viewport};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 500;
pub const DEFAULT_AXIS_AREA_WIDTH: u32 = 15;
pub const DEFAULT_TITLE: &str = "Diagram";

/// Named options of one chart build.
///
/// Serializable so hosts can keep chart setups in a file instead of
/// assembling command lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_axis_area_width")]
    pub axis_area_width: u32,
    #[serde(default = "default_spread_range")]
    pub spread_range: f64,
    #[serde(default = "default_spread_factor")]
    pub spread_factor: f64,
    #[serde(default = "default_max_average_quotient")]
    pub max_average_quotient: f64,
    /// Centered moving-average window; `None` disables smoothing.
    #[serde(default)]
    pub moving_average_span: Option<usize>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_x_max_markers")]
    pub x_max_markers: usize,
    #[serde(default = "default_y_max_markers")]
    pub y_max_markers: usize,
    #[serde(default = "default_bridge_gaps")]
    pub bridge_gaps: bool,
    /// Lower bound of the reference gap in x units; defaults to five minutes
    /// in the units of the x series.
    #[serde(default)]
    pub gap_floor: Option<f64>,
    #[serde(default)]
    pub compress_outliers: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            axis_area_width: default_axis_area_width(),
            spread_range: default_spread_range(),
            spread_factor: default_spread_factor(),
            max_average_quotient: default_max_average_quotient(),
            moving_average_span: None,
            title: default_title(),
            x_max_markers: default_x_max_markers(),
            y_max_markers: default_y_max_markers(),
            bridge_gaps: default_bridge_gaps(),
            gap_floor: None,
            compress_outliers: false,
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_axis_area_width(mut self, axis_area_width: u32) -> Self {
        self.axis_area_width = axis_area_width;
        self
    }

    #[must_use]
    pub fn with_spread(mut self, spread_range: f64, spread_factor: f64) -> Self {
        self.spread_range = spread_range;
        self.spread_factor = spread_factor;
        self
    }

    #[must_use]
    pub fn with_max_average_quotient(mut self, max_average_quotient: f64) -> Self {
        self.max_average_quotient = max_average_quotient;
        self
    }

    #[must_use]
    pub fn with_moving_average(mut self, span: Option<usize>) -> Self {
        self.moving_average_span = span;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_max_markers(mut self, x_max_markers: usize, y_max_markers: usize) -> Self {
        self.x_max_markers = x_max_markers;
        self.y_max_markers = y_max_markers;
        self
    }

    #[must_use]
    pub fn with_gap_bridging(mut self, enabled: bool, floor: Option<f64>) -> Self {
        self.bridge_gaps = enabled;
        self.gap_floor = floor;
        self
    }

    #[must_use]
    pub fn with_compress_outliers(mut self, enabled: bool) -> Self {
        self.compress_outliers = enabled;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Range selector configured from these options.
    pub fn range_selector(&self) -> ChartResult<RangeSelector> {
        RangeSelector::new(
            self.spread_range,
            self.spread_factor,
            self.max_average_quotient,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if self.axis_area_width >= self.width || self.axis_area_width >= self.height {
            return Err(ChartError::InvalidConfiguration(format!(
                "axis area width {} must be smaller than width {} and height {}",
                self.axis_area_width, self.width, self.height
            )));
        }
        self.range_selector()?;
        if self.moving_average_span == Some(0) {
            return Err(ChartError::InvalidConfiguration(
                "moving average span must be > 0".to_owned(),
            ));
        }
        if self.x_max_markers == 0 || self.y_max_markers == 0 {
            return Err(ChartError::InvalidConfiguration(
                "marker counts must be > 0".to_owned(),
            ));
        }
        if let Some(floor) = self.gap_floor {
            if !floor.is_finite() || floor < 0.0 {
                return Err(ChartError::InvalidConfiguration(format!(
                    "gap floor must be finite and >= 0, found {floor}"
                )));
            }
        }
        Ok(())
    }

    /// Parses command line options (`--width=800`, `--moving-average`, ...)
    /// on top of the defaults and validates the result.
    pub fn from_args<I, S>(args: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            let (name, value) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (arg, None),
            };
            match name {
                "--width" => options.width = parse_option(name, value)?,
                "--height" => options.height = parse_option(name, value)?,
                "--axis-area-width" => options.axis_area_width = parse_option(name, value)?,
                "--spread-range" => options.spread_range = parse_option(name, value)?,
                "--spread-factor" => options.spread_factor = parse_option(name, value)?,
                "--max-average-quotient" => {
                    options.max_average_quotient = parse_option(name, value)?;
                }
                "--moving-average" => {
                    options.moving_average_span = Some(match value {
                        Some(_) => parse_option(name, value)?,
                        None => DEFAULT_MOVING_AVERAGE_SPAN,
                    });
                }
                "--title" => options.title = value.unwrap_or_default().to_owned(),
                _ => {
                    return Err(ChartError::InvalidConfiguration(format!(
                        "unknown option: {arg}"
                    )));
                }
            }
        }
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to parse chart options json: {e}"))
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart options json: {e}"))
        })
    }
}

fn parse_option<T: std::str::FromStr>(name: &str, value: Option<&str>) -> ChartResult<T> {
    let Some(value) = value else {
        return Err(ChartError::InvalidConfiguration(format!(
            "missing value for {name}"
        )));
    };
    value.trim().parse().map_err(|_| {
        ChartError::InvalidConfiguration(format!("invalid value for {name}: `{value}`"))
    })
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_axis_area_width() -> u32 {
    DEFAULT_AXIS_AREA_WIDTH
}

fn default_spread_range() -> f64 {
    DEFAULT_SPREAD_RANGE
}

fn default_spread_factor() -> f64 {
    DEFAULT_SPREAD_FACTOR
}

fn default_max_average_quotient() -> f64 {
    DEFAULT_MAX_AVERAGE_QUOTIENT
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

fn default_x_max_markers() -> usize {
    DEFAULT_X_MAX_MARKERS
}

fn default_y_max_markers() -> usize {
    DEFAULT_Y_MAX_MARKERS
}

fn default_bridge_gaps() -> bool {
    true
}
