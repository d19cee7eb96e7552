use powerchart::render::{
    ChartFrame, Color, NullRenderer, Renderer, SvgDocument, SvgRenderer, series_color,
    series_dash_pattern,
};
use powerchart::{Chart, ChartOptions, ChartPipeline};

fn frame() -> ChartFrame {
    let mut chart = Chart::from_titles(["x", "power;2;;;kW", "<load>"]).expect("chart");
    for index in 0..20u32 {
        let x = f64::from(index);
        chart.add_row([x, x * 2.0, 40.0 - x]).expect("row");
    }
    chart.add_legend_row("budget", 1.0, 0.5, 2.0);

    ChartPipeline::new(ChartOptions::default().with_title("Solar & grid"))
        .expect("pipeline")
        .render(chart)
        .expect("frame")
}

#[test]
fn page_wraps_svg_and_legend_in_html() {
    let mut renderer = SvgRenderer::new(SvgDocument::Page);
    renderer.render(&frame()).expect("render");
    let out = renderer.output();

    assert!(out.starts_with("<html>\n<body>\n<h1>Solar &amp; grid</h1>"));
    assert!(out.contains("<svg height=\"500\" width=\"1000\">"));
    assert!(out.contains("<table class=\"chart-legend\">"));
    assert!(out.trim_end().ends_with("</html>"));
}

#[test]
fn fragment_has_no_page_chrome() {
    let mut renderer = SvgRenderer::new(SvgDocument::Fragment);
    renderer.render(&frame()).expect("render");
    let out = renderer.into_output();

    assert!(out.starts_with("<svg "));
    assert!(!out.contains("<html>"));
    assert!(!out.contains("<h1>"));
}

#[test]
fn every_series_gets_a_styled_polyline() {
    let mut renderer = SvgRenderer::default();
    renderer.render(&frame()).expect("render");
    let out = renderer.output();

    assert_eq!(out.matches("<polyline").count(), 2);
    assert!(out.contains(&format!(
        "stroke:{};stroke-width:2\" stroke-dasharray=\"{}\"",
        series_color(0).css(),
        series_dash_pattern(0)
    )));
    assert!(out.contains(&format!("stroke:{};stroke-width:1", series_color(1).css())));
    assert!(out.contains("15.0,485.0 "));
}

#[test]
fn legend_lists_x_series_and_extra_rows() {
    let mut renderer = SvgRenderer::default();
    renderer.render(&frame()).expect("render");
    let out = renderer.output();

    assert!(out.contains("<td><strong>x:</strong></td><td></td><td>0.00</td><td>19.00</td><td>20</td>"));
    assert!(out.contains("<td><strong>power:</strong></td>"));
    assert!(out.contains("<td class=\"svg-left\">kW</td>"));
    assert!(out.contains("<td><strong>&lt;load&gt;:</strong></td>"));
    assert!(out.contains("<tr><td>budget:</td><td>1</td><td>0.5</td><td>2</td><td></td><td></td></tr>"));
}

#[test]
fn non_finite_geometry_is_refused() {
    let mut broken = frame();
    broken.series[0].points[0].y = f64::NAN;

    let mut renderer = SvgRenderer::default();
    assert!(renderer.render(&broken).is_err());
    assert!(renderer.output().is_empty());
    assert!(NullRenderer::default().render(&broken).is_err());
}

#[test]
fn palette_and_dash_patterns_distinguish_series() {
    assert_eq!(series_color(0), Color::BLACK);
    assert_eq!(series_color(1), Color::RED);
    assert_eq!(series_color(6), Color::BLACK);
    assert_eq!(series_dash_pattern(0), "5,3,1,1");
    assert_eq!(series_dash_pattern(2), "15,3,1,1,1,1,1,1");
    assert_eq!(Color::BLUE.css().to_string(), "rgb(0,0,255)");
    assert!(Color::GRID.validate().is_ok());
    assert!(Color::rgba(1.5, 0.0, 0.0, 1.0).validate().is_err());
}
