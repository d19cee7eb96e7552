use tracing::debug;

use crate::api::{Chart, ChartOptions};
use crate::core::{
    AxisScale, GapBridge, Projector, RangeSelector, Series, ValueKind, moving_average, shrink,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{AxisFrame, ChartFrame, LegendRow, Renderer, SeriesFrame, XLegend};

/// Turns a filled [`Chart`] into a render-ready [`ChartFrame`].
///
/// Stages run in a fixed order: gap bridging on x, moving average per y
/// series, downsampling to the plot width, range selection, then projection.
/// A pipeline holds no per-chart state and can be reused for many charts.
#[derive(Debug, Clone)]
pub struct ChartPipeline {
    options: ChartOptions,
    range_selector: RangeSelector,
}

impl ChartPipeline {
    /// Validates the options before any data is touched.
    pub fn new(options: ChartOptions) -> ChartResult<Self> {
        options.validate()?;
        let range_selector = options.range_selector()?;
        Ok(Self {
            options,
            range_selector,
        })
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Runs the data stages in place; afterwards every series has its band.
    pub fn prepare(&self, chart: &mut Chart) -> ChartResult<()> {
        if chart.is_empty() {
            debug!(columns = chart.column_count(), "empty chart, nothing to prepare");
            return Ok(());
        }

        let (x, ys) = chart.columns_mut();
        if self.options.bridge_gaps {
            let kind = x.kind().unwrap_or(ValueKind::Float);
            let bridge = self
                .options
                .gap_floor
                .map_or_else(|| GapBridge::for_kind(kind), GapBridge::new);
            let gaps = bridge.apply(x, ys);
            debug!(gaps, floor = bridge.floor(), points = x.len(), "gap bridging done");
        }

        if let Some(span) = self.options.moving_average_span {
            for series in ys.iter_mut() {
                moving_average(series.values_mut(), span);
            }
            debug!(span, series = ys.len(), "moving average applied");
        }

        let target = self.options.width as usize;
        if x.len() > target {
            let before = x.len();
            let resampled = {
                let columns: Vec<&[f64]> = ys.iter().map(Series::values).collect();
                shrink(x.values(), &columns, target)
            };
            x.replace_values(resampled.x);
            for (series, values) in ys.iter_mut().zip(resampled.ys) {
                series.replace_values(values);
            }
            debug!(from = before, to = x.len(), "series shrunk to plot width");
        }

        RangeSelector::apply_full_range(x);
        for series in ys.iter_mut() {
            let stats = self.range_selector.apply(series);
            if self.options.compress_outliers {
                series.compute_reduced_range();
            }
            debug!(
                series = series.title(),
                min = stats.map(|s| s.min),
                max = stats.map(|s| s.max),
                reduced_range = series.reduced_range(),
                "range selected"
            );
        }
        Ok(())
    }

    /// Computes axis markers, polylines and legend rows of a prepared chart.
    pub fn project(&self, chart: &Chart) -> ChartResult<ChartFrame> {
        if chart.is_empty() {
            return Err(ChartError::InvalidData(
                "chart has no rows to project".to_owned(),
            ));
        }

        let viewport = self.options.viewport();
        let x = chart.x();
        let projector = Projector::for_x_series(viewport, self.options.axis_area_width, x)?;

        let x_axis = {
            let kind = x.label_kind();
            let scale = AxisScale::compute(
                x.extremum(true)?,
                x.extremum(false)?,
                kind,
                self.options.x_max_markers,
            );
            AxisFrame {
                title: x.title().to_owned(),
                markers: projector.x_markers(&scale, kind, relative_base(x))?,
                scale,
            }
        };

        let mut series_frames = Vec::with_capacity(chart.ys().len());
        let mut legend = Vec::with_capacity(chart.ys().len() + chart.legend_rows().len());
        for series in chart.ys() {
            let y_scale = projector.y_scale_for(series, self.options.compress_outliers)?;
            let kind = series.label_kind();
            let (min, max) = (series.extremum(true)?, series.extremum(false)?);
            let scale = AxisScale::compute(min, max, kind, self.options.y_max_markers);
            let y_axis = AxisFrame {
                title: series.title().to_owned(),
                markers: projector.y_markers(y_scale, &scale, kind, relative_base(series))?,
                scale,
            };
            series_frames.push(SeriesFrame {
                title: series.title().to_owned(),
                stroke_width: series.stroke_width(),
                y_axis,
                points: projector.polyline(x, series, y_scale)?,
            });
            legend.push(legend_row(series)?);
        }
        legend.extend(chart.legend_rows().iter().cloned());

        let x_kind = x.kind().unwrap_or(ValueKind::Float);
        let x_legend = XLegend {
            title: x.title().to_owned(),
            first: x_kind.display(x.extremum(true)?, Some(2)),
            last: x_kind.display(x.extremum(false)?, Some(2)),
            count: x.len(),
            comment: x.comment().to_owned(),
        };

        let frame = ChartFrame {
            viewport,
            axis_area_width: self.options.axis_area_width,
            title: self.options.title.clone(),
            x_axis,
            series: series_frames,
            legend,
            x_legend,
            errors: chart.errors().entries().to_vec(),
        };
        debug!(
            series = frame.series.len(),
            points = frame.point_count(),
            markers = frame.marker_count(),
            errors = frame.errors.len(),
            "chart projected"
        );
        Ok(frame)
    }

    /// [`Self::prepare`] followed by [`Self::project`].
    pub fn render(&self, mut chart: Chart) -> ChartResult<ChartFrame> {
        self.prepare(&mut chart)?;
        self.project(&chart)
    }

    /// Renders the chart and hands the frame to `renderer`.
    pub fn render_with<R: Renderer>(&self, renderer: &mut R, chart: Chart) -> ChartResult<ChartFrame> {
        let frame = self.render(chart)?;
        renderer.render(&frame)?;
        Ok(frame)
    }
}

fn relative_base(series: &Series) -> Option<f64> {
    if series.attributes().relative_to_start {
        series.first()
    } else {
        None
    }
}

fn legend_row(series: &Series) -> ChartResult<LegendRow> {
    let (min, max) = (series.extremum(true)?, series.extremum(false)?);
    let last_or_diff = if series.attributes().last_is_diff {
        series.latest().zip(series.first()).map(|(last, first)| last - first)
    } else {
        series.latest()
    };
    Ok(LegendRow {
        title: series.title().to_owned(),
        average: series.average()?,
        min,
        max,
        last_or_diff,
        comment: series.comment().to_owned(),
    })
}
