use crate::core::primitives::non_degenerate_span;
use crate::error::{ChartError, ChartResult};

/// Smallest domain span used when the data has no extent.
pub const DEGENERATE_SPAN_EPSILON: f64 = 1e-10;

/// Affine map from a value domain onto a pixel interval.
///
/// The pixel interval may run backwards (`pixel_start > pixel_end`), which is
/// how the vertical axis puts larger values nearer the top. A domain with no
/// extent is widened to [`DEGENERATE_SPAN_EPSILON`] so every value maps to
/// `pixel_start` instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_span: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_span: non_degenerate_span(domain_end - domain_start, DEGENERATE_SPAN_EPSILON),
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_start + self.domain_span)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        (self.pixel_start, self.pixel_end)
    }

    /// Position of `value` inside the domain, `0.0` at the start and `1.0` at the end.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.domain_start) / self.domain_span
    }

    /// Maps without clamping; values outside the domain land outside the pixel range.
    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        Ok(self.pixel_start + self.normalize(value) * (self.pixel_end - self.pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let pixel_span = self.pixel_end - self.pixel_start;
        if pixel_span == 0.0 {
            return Err(ChartError::InvalidData(
                "scale pixel range has no extent".to_owned(),
            ));
        }
        let normalized = (pixel - self.pixel_start) / pixel_span;
        Ok(self.domain_start + normalized * self.domain_span)
    }
}
