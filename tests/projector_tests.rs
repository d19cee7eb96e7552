use powerchart::ChartError;
use powerchart::core::{
    AxisScale, LinearScale, Projector, RangeSelector, Series, ValueKind, Viewport,
};

fn series(title: &str, values: &[f64]) -> Series {
    let mut series = Series::new(title);
    for &value in values {
        series.add(value).expect("finite sample");
    }
    RangeSelector::apply_full_range(&mut series).expect("stats");
    series
}

fn projector() -> Projector {
    Projector::new(Viewport::new(1000, 500), 15, 0.0, 100.0).expect("valid projector")
}

#[test]
fn x_values_span_from_axis_band_to_width() {
    let scale = projector().x_scale();
    assert!((scale.domain_to_pixel(0.0).expect("px") - 15.0).abs() <= 1e-9);
    assert!((scale.domain_to_pixel(100.0).expect("px") - 1000.0).abs() <= 1e-9);
    assert!((scale.domain_to_pixel(50.0).expect("px") - 507.5).abs() <= 1e-9);
}

#[test]
fn y_values_grow_upwards_within_usable_height() {
    let projector = projector();
    assert!((projector.usable_height() - 485.0).abs() <= 1e-12);

    let y_scale = projector.y_scale(0.0, 10.0, None).expect("y scale");
    assert!((y_scale.domain_to_pixel(10.0).expect("px") - 0.0).abs() <= 1e-9);
    assert!((y_scale.domain_to_pixel(0.0).expect("px") - 485.0).abs() <= 1e-9);
    assert!((y_scale.domain_to_pixel(5.0).expect("px") - 242.5).abs() <= 1e-9);
}

#[test]
fn reduced_range_compresses_the_vertical_scale() {
    let y_scale = projector().y_scale(0.0, 10.0, Some(2.0)).expect("y scale");
    assert!((y_scale.domain_to_pixel(10.0).expect("px") - 242.5).abs() <= 1e-9);
    assert!((y_scale.domain_to_pixel(0.0).expect("px") - 485.0).abs() <= 1e-9);
}

#[test]
fn flat_band_maps_every_value_to_the_bottom() {
    let y_scale = projector().y_scale(3.0, 3.0, None).expect("y scale");
    let px = y_scale.domain_to_pixel(3.0).expect("px");
    assert!(px.is_finite());
    assert!((px - 485.0).abs() <= 1e-9);

    let flat_x = series("x", &[5.0, 5.0, 5.0]);
    let projector = Projector::for_x_series(Viewport::new(1000, 500), 15, &flat_x).expect("projector");
    let px = projector.x_scale().domain_to_pixel(5.0).expect("px");
    assert!((px - 15.0).abs() <= 1e-9);
}

#[test]
fn values_outside_the_band_are_not_clamped() {
    let y_scale = projector().y_scale(0.0, 10.0, None).expect("y scale");
    assert!(y_scale.domain_to_pixel(20.0).expect("px") < 0.0);
    assert!(y_scale.domain_to_pixel(-10.0).expect("px") > 485.0);
}

#[test]
fn polyline_projects_every_sample() {
    let x = series("x", &[0.0, 50.0, 100.0]);
    let y = series("y", &[0.0, 10.0, 5.0]);
    let projector = Projector::for_x_series(Viewport::new(1000, 500), 15, &x).expect("projector");
    let y_scale = projector.y_scale_for(&y, false).expect("y scale");

    let points = projector.polyline(&x, &y, y_scale).expect("polyline");
    assert_eq!(points.len(), 3);
    assert!((points[0].x - 15.0).abs() <= 1e-9 && (points[0].y - 485.0).abs() <= 1e-9);
    assert!((points[1].x - 507.5).abs() <= 1e-9 && points[1].y.abs() <= 1e-9);
    assert!((points[2].x - 1000.0).abs() <= 1e-9 && (points[2].y - 242.5).abs() <= 1e-9);
}

#[test]
fn markers_outside_the_plot_area_are_dropped() {
    let projector = projector();
    let scale = AxisScale {
        start: -10.0,
        step: 10.0,
        count: 3,
    };

    let markers = projector
        .x_markers(&scale, ValueKind::Float, None)
        .expect("x markers");
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].value, 0.0);
    assert!((markers[0].position - 15.0).abs() <= 1e-9);
    assert_eq!(markers[1].label, "10.0");
    assert!((markers[1].position - 113.5).abs() <= 1e-9);

    let y_scale = projector.y_scale(0.0, 10.0, None).expect("y scale");
    let markers = projector
        .y_markers(y_scale, &scale, ValueKind::Float, None)
        .expect("y markers");
    assert_eq!(markers.len(), 2);
    assert!((markers[0].position - 485.0).abs() <= 1e-9);
    assert!(markers[1].position.abs() <= 1e-9);
}

#[test]
fn marker_positions_match_their_labels() {
    let projector =
        Projector::new(Viewport::new(1000, 500), 15, 3.0, 21.0).expect("valid projector");
    let scale = AxisScale::compute(3.0, 21.0, ValueKind::Float, 10);
    assert_eq!((scale.start, scale.step), (2.0, 2.0));

    let markers = projector
        .x_markers(&scale, ValueKind::Float, None)
        .expect("x markers");
    assert_eq!(markers[0].label, "4.00");
    let x_scale = projector.x_scale();
    for marker in &markers {
        let expected = x_scale.domain_to_pixel(marker.value).expect("px");
        assert!((marker.position - expected).abs() <= 1e-9, "{marker:?}");
    }
}

#[test]
fn markers_a_hair_outside_the_edge_are_kept() {
    let projector = projector();
    let scale = AxisScale {
        start: -1e-9,
        step: 50.0,
        count: 3,
    };

    let markers = projector
        .x_markers(&scale, ValueKind::Float, None)
        .expect("x markers");
    assert_eq!(markers.len(), 3);
    assert!((markers[0].position - 15.0).abs() <= 1e-12);
}

#[test]
fn relative_labels_subtract_the_base() {
    let scale = AxisScale {
        start: 100.0,
        step: 5.0,
        count: 2,
    };
    let markers = projector()
        .x_markers(&scale, ValueKind::Float, Some(100.0))
        .expect("x markers");
    assert_eq!(markers[0].label, "0.000");
    assert_eq!(markers[1].label, "5.00");
}

#[test]
fn invalid_geometry_is_rejected() {
    assert!(matches!(
        Projector::new(Viewport::new(0, 500), 15, 0.0, 1.0),
        Err(ChartError::InvalidViewport { .. })
    ));
    assert!(matches!(
        Projector::new(Viewport::new(100, 500), 100, 0.0, 1.0),
        Err(ChartError::InvalidConfiguration(_))
    ));
    assert!(Projector::new(Viewport::new(100, 100), 15, f64::NAN, 1.0).is_err());
}

#[test]
fn x_series_without_range_cannot_be_projected() {
    let mut x = Series::new("x");
    x.add(1.0).expect("sample");
    assert!(matches!(
        Projector::for_x_series(Viewport::new(100, 100), 15, &x),
        Err(ChartError::RangeNotComputed { .. })
    ));
}

#[test]
fn linear_scale_inverts_its_mapping() {
    let scale = LinearScale::new(-5.0, 5.0, 485.0, 0.0).expect("scale");
    let px = scale.domain_to_pixel(2.5).expect("px");
    let value = scale.pixel_to_domain(px).expect("value");
    assert!((value - 2.5).abs() <= 1e-9);
    assert!((scale.normalize(0.0) - 0.5).abs() <= 1e-12);
    assert!(scale.domain_to_pixel(f64::INFINITY).is_err());
}
