use crate::error::ChartResult;
use crate::render::{ChartFrame, Renderer};

/// No-op renderer used by tests and headless pipelines.
///
/// It still validates frame content so tests can catch invalid geometry
/// without producing markup.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_series_count: usize,
    pub last_point_count: usize,
    pub last_marker_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_series_count = frame.series.len();
        self.last_point_count = frame.point_count();
        self.last_marker_count = frame.marker_count();
        Ok(())
    }
}
