mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::{AxisFrame, ChartFrame, LegendRow, SeriesFrame, XLegend};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, CssColor, SERIES_PALETTE, series_color, series_dash_pattern};
pub use svg_renderer::{SvgDocument, SvgRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `ChartFrame`: every coordinate and
/// label is already computed, so drawing code only prints.
pub trait Renderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()>;
}
