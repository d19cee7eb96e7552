use serde::{Deserialize, Serialize};

use crate::core::axis_scale::AxisScale;
use crate::core::scale::LinearScale;
use crate::core::series::Series;
use crate::core::types::{PixelPoint, Viewport};
use crate::core::value::ValueKind;
use crate::error::{ChartError, ChartResult};

/// Markers this close outside the plot area, in pixels, are kept on its edge.
const MARKER_EDGE_TOLERANCE: f64 = 0.5;

/// One labelled tick on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisMarker {
    /// Pixel column (x axis) or pixel row (y axis), inside the plot area.
    pub position: f64,
    pub value: f64,
    pub label: String,
}

/// Maps series values into the plot area of a viewport.
///
/// The plot area spans `axis_area_width..width` horizontally and
/// `0..height - axis_area_width` vertically; the bands left and below it
/// hold the axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    viewport: Viewport,
    axis_area_width: u32,
    x_scale: LinearScale,
}

impl Projector {
    pub fn new(viewport: Viewport, axis_area_width: u32, x_min: f64, x_max: f64) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if axis_area_width >= viewport.width || axis_area_width >= viewport.height {
            return Err(ChartError::InvalidConfiguration(format!(
                "axis area width {axis_area_width} leaves no plot area in {}x{}",
                viewport.width, viewport.height
            )));
        }

        let x_scale = LinearScale::new(
            x_min,
            x_max,
            f64::from(axis_area_width),
            f64::from(viewport.width),
        )?;
        Ok(Self {
            viewport,
            axis_area_width,
            x_scale,
        })
    }

    /// Projector for the band stored in the x series.
    pub fn for_x_series(viewport: Viewport, axis_area_width: u32, x: &Series) -> ChartResult<Self> {
        Self::new(viewport, axis_area_width, x.extremum(true)?, x.extremum(false)?)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn axis_area_width(&self) -> u32 {
        self.axis_area_width
    }

    #[must_use]
    pub fn usable_height(&self) -> f64 {
        self.viewport.usable_height(self.axis_area_width)
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    /// Vertical scale for the band `min..=max`.
    ///
    /// With `reduced_range` the normalised value is further divided by it,
    /// which compresses series dominated by a few large samples.
    pub fn y_scale(&self, min: f64, max: f64, reduced_range: Option<f64>) -> ChartResult<LinearScale> {
        let mut span = max - min;
        if let Some(reduced) = reduced_range.filter(|reduced| reduced.is_finite() && *reduced != 0.0) {
            span *= reduced;
        }
        LinearScale::new(min, min + span, self.usable_height(), 0.0)
    }

    /// Vertical scale from the computed band of `series`.
    pub fn y_scale_for(&self, series: &Series, compress_outliers: bool) -> ChartResult<LinearScale> {
        let reduced = if compress_outliers {
            series.reduced_range()
        } else {
            None
        };
        self.y_scale(series.extremum(true)?, series.extremum(false)?, reduced)
    }

    /// Polyline of `y` against `x`; values outside the band leave the plot area.
    pub fn polyline(&self, x: &Series, y: &Series, y_scale: LinearScale) -> ChartResult<Vec<PixelPoint>> {
        let len = x.len().min(y.len());
        let mut points = Vec::with_capacity(len);
        for index in 0..len {
            let (Some(x_value), Some(y_value)) = (x.value(index), y.value(index)) else {
                continue;
            };
            points.push(PixelPoint::new(
                self.x_scale.domain_to_pixel(x_value)?,
                y_scale.domain_to_pixel(y_value)?,
            ));
        }
        Ok(points)
    }

    pub fn x_markers(
        &self,
        scale: &AxisScale,
        kind: ValueKind,
        relative_base: Option<f64>,
    ) -> ChartResult<Vec<AxisMarker>> {
        let (left, right) = self.x_scale.pixel_range();
        markers(self.x_scale, scale, kind, relative_base, left, right)
    }

    pub fn y_markers(
        &self,
        y_scale: LinearScale,
        scale: &AxisScale,
        kind: ValueKind,
        relative_base: Option<f64>,
    ) -> ChartResult<Vec<AxisMarker>> {
        markers(y_scale, scale, kind, relative_base, 0.0, self.usable_height())
    }
}

fn markers(
    pixels: LinearScale,
    scale: &AxisScale,
    kind: ValueKind,
    relative_base: Option<f64>,
    low: f64,
    high: f64,
) -> ChartResult<Vec<AxisMarker>> {
    let mut out = Vec::with_capacity(scale.count);
    for value in scale.values() {
        let position = pixels.domain_to_pixel(value)?;
        // The aligned start may lie below the band; such markers are dropped.
        if position < low - MARKER_EDGE_TOLERANCE || position > high + MARKER_EDGE_TOLERANCE {
            continue;
        }
        out.push(AxisMarker {
            position: position.clamp(low, high),
            value,
            label: kind.axis_label(value, relative_base),
        });
    }
    Ok(out)
}
