use std::fmt::{self, Write};

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    AxisFrame, ChartFrame, Color, LegendRow, Renderer, series_color, series_dash_pattern,
};

const TICK_HALF_LENGTH: f64 = 6.0;
const DEFAULT_FONT_SIZE: u32 = 10;
const DEFAULT_AXIS_STROKE_WIDTH: u32 = 2;
const Y_LABEL_COLUMN_WIDTH: f64 = 30.0;

/// Shape of the markup produced by [`SvgRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvgDocument {
    /// Complete HTML page: heading, SVG block and legend table.
    #[default]
    Page,
    /// SVG block and legend table only, for embedding into a host page.
    Fragment,
}

/// Prints a [`ChartFrame`] as SVG embedded in HTML.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    document: SvgDocument,
    font_size: u32,
    axis_stroke_width: u32,
    output: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(SvgDocument::Page)
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new(document: SvgDocument) -> Self {
        Self {
            document,
            font_size: DEFAULT_FONT_SIZE,
            axis_stroke_width: DEFAULT_AXIS_STROKE_WIDTH,
            output: String::new(),
        }
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size.max(1);
        self
    }

    /// Markup of the last rendered frame.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    fn write_frame(&self, frame: &ChartFrame, out: &mut String) -> fmt::Result {
        if self.document == SvgDocument::Page {
            writeln!(out, "<html>\n<body>\n<h1>{}</h1>", escape(&frame.title))?;
        }
        writeln!(
            out,
            "<svg height=\"{}\" width=\"{}\">",
            frame.viewport.height, frame.viewport.width
        )?;
        self.write_x_axis(frame, out)?;
        for (index, series) in frame.series.iter().enumerate() {
            let color = series_color(index);
            write!(
                out,
                "<polyline style=\"fill:none;stroke:{};stroke-width:{}\" stroke-dasharray=\"{}\" points=\"",
                color.css(),
                series.stroke_width,
                series_dash_pattern(index)
            )?;
            for point in &series.points {
                write!(out, "{:.1},{:.1} ", point.x, point.y)?;
            }
            writeln!(out, "\" />")?;
            self.write_y_axis(frame, &series.y_axis, index, color, out)?;
        }
        writeln!(out, "</svg>")?;
        self.write_legend(frame, out)?;
        if self.document == SvgDocument::Page {
            writeln!(out, "</body>\n</html>")?;
        }
        Ok(())
    }

    fn write_x_axis(&self, frame: &ChartFrame, out: &mut String) -> fmt::Result {
        let axis = f64::from(frame.axis_area_width);
        let bottom = frame.plot_bottom();
        let width = f64::from(frame.viewport.width);
        self.line(out, (axis, bottom), (width, bottom), Color::BLUE, None)?;

        let (top, below) = (bottom - TICK_HALF_LENGTH, bottom + TICK_HALF_LENGTH);
        for (index, marker) in frame.x_axis.markers.iter().enumerate() {
            let x = marker.position;
            self.line(out, (x, top), (x, below), Color::BLUE, None)?;
            self.text(out, (x - 10.0, below + axis / 2.0), Color::BLUE, &marker.label)?;
            if index > 0 {
                self.line(out, (x, top - 5.0), (x, 0.0), Color::GRID, Some("5,5"))?;
            }
        }
        Ok(())
    }

    fn write_y_axis(
        &self,
        frame: &ChartFrame,
        y_axis: &AxisFrame,
        series_index: usize,
        color: Color,
        out: &mut String,
    ) -> fmt::Result {
        let axis = f64::from(frame.axis_area_width);
        let width = f64::from(frame.viewport.width);
        self.line(out, (axis, 0.0), (axis, frame.plot_bottom()), color, None)?;

        let (left, right) = (axis - TICK_HALF_LENGTH, axis + TICK_HALF_LENGTH);
        let label_x = 1.0 + series_index as f64 * Y_LABEL_COLUMN_WIDTH;
        for (index, marker) in y_axis.markers.iter().enumerate() {
            let y = marker.position;
            self.line(out, (left, y), (right, y), color, None)?;
            self.text(out, (label_x, y), color, &marker.label)?;
            if series_index == 0 && index > 0 {
                self.line(out, (right + 5.0, y), (width, y), Color::GRID, Some("5,5"))?;
            }
        }
        Ok(())
    }

    fn write_legend(&self, frame: &ChartFrame, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            "<table class=\"chart-legend\"><thead><tr><th></th><th>average</th><th>minimum</th>\
             <th>maximum</th><th>last</th><th class=\"svg-left\">notice</th></tr></thead>"
        )?;
        writeln!(out, "<tbody>")?;
        let x = &frame.x_legend;
        writeln!(
            out,
            "<tr style=\"color: {}\"><td><strong>{}:</strong></td><td></td><td>{}</td><td>{}</td>\
             <td>{}</td><td class=\"svg-left\">{}</td></tr>",
            Color::BLUE.css(),
            escape(&x.title),
            escape(&x.first),
            escape(&x.last),
            x.count,
            escape(&x.comment)
        )?;
        for (index, row) in frame.legend.iter().enumerate() {
            if index < frame.series.len() {
                write_series_row(out, row, series_color(index))?;
            } else {
                writeln!(
                    out,
                    "<tr><td>{}:</td><td>{}</td><td>{}</td><td>{}</td><td></td><td></td></tr>",
                    escape(&row.title),
                    row.average,
                    row.min,
                    row.max
                )?;
            }
        }
        writeln!(out, "</tbody>\n</table>")
    }

    fn line(
        &self,
        out: &mut String,
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        dash: Option<&str>,
    ) -> fmt::Result {
        write!(
            out,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{}\"",
            from.0,
            from.1,
            to.0,
            to.1,
            color.css(),
            self.axis_stroke_width
        )?;
        if color.alpha < 1.0 {
            write!(out, " stroke-opacity=\"{}\"", color.alpha)?;
        }
        if let Some(dash) = dash {
            write!(out, " stroke-dasharray=\"{dash}\"")?;
        }
        writeln!(out, " />")
    }

    fn text(&self, out: &mut String, at: (f64, f64), color: Color, text: &str) -> fmt::Result {
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"{}\">{}</text>",
            at.0,
            at.1,
            color.css(),
            self.font_size,
            escape(text)
        )
    }
}

fn write_series_row(out: &mut String, row: &LegendRow, color: Color) -> fmt::Result {
    write!(
        out,
        "<tr style=\"color: {}\"><td><strong>{}:</strong></td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td>",
        color.css(),
        escape(&row.title),
        row.average,
        row.min,
        row.max
    )?;
    match row.last_or_diff {
        Some(last) => write!(out, "<td>{last:.2}</td>")?,
        None => write!(out, "<td></td>")?,
    }
    writeln!(out, "<td class=\"svg-left\">{}</td></tr>", escape(&row.comment))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut out = String::new();
        self.write_frame(frame, &mut out)
            .map_err(|e| ChartError::InvalidData(format!("failed to write svg markup: {e}")))?;
        debug!(
            bytes = out.len(),
            series = frame.series.len(),
            "svg frame rendered"
        );
        self.output = out;
        Ok(())
    }
}
