use powerchart::api::{DEFAULT_AXIS_AREA_WIDTH, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};
use powerchart::core::Viewport;
use powerchart::{ChartError, ChartOptions};

#[test]
fn defaults_describe_a_1000_by_500_diagram() {
    let options = ChartOptions::default();
    assert_eq!(options.width, DEFAULT_WIDTH);
    assert_eq!(options.height, DEFAULT_HEIGHT);
    assert_eq!(options.axis_area_width, DEFAULT_AXIS_AREA_WIDTH);
    assert_eq!(options.title, DEFAULT_TITLE);
    assert_eq!(options.viewport(), Viewport::new(1000, 500));
    assert_eq!(options.spread_range, 90.0);
    assert_eq!(options.spread_factor, 1.1);
    assert_eq!(options.max_average_quotient, 1.0);
    assert_eq!(options.moving_average_span, None);
    assert!(options.bridge_gaps);
    assert!(!options.compress_outliers);
    options.validate().expect("defaults are valid");
}

#[test]
fn command_line_options_override_defaults() {
    let options = ChartOptions::from_args([
        "--width=800",
        "--height=400",
        "--spread-range=80",
        "--spread-factor=2.5",
        "--max-average-quotient=3",
        "--moving-average",
        "--title=Grid import",
    ])
    .expect("valid options");

    assert_eq!(options.viewport(), Viewport::new(800, 400));
    assert_eq!(options.spread_range, 80.0);
    assert_eq!(options.spread_factor, 2.5);
    assert_eq!(options.max_average_quotient, 3.0);
    assert_eq!(options.moving_average_span, Some(5));
    assert_eq!(options.title, "Grid import");
}

#[test]
fn explicit_moving_average_span_is_parsed() {
    let options = ChartOptions::from_args(["--moving-average=9"]).expect("valid options");
    assert_eq!(options.moving_average_span, Some(9));
}

#[test]
fn unknown_or_malformed_arguments_are_rejected() {
    let unknown = ChartOptions::from_args(["--colour=red"]).expect_err("unknown option");
    assert!(unknown.to_string().contains("unknown option: --colour=red"));

    assert!(matches!(
        ChartOptions::from_args(["--width=wide"]),
        Err(ChartError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ChartOptions::from_args(["--width"]),
        Err(ChartError::InvalidConfiguration(_))
    ));
}

#[test]
fn out_of_range_values_fail_validation() {
    assert!(ChartOptions::from_args(["--spread-range=30"]).is_err());
    assert!(ChartOptions::from_args(["--spread-factor=0.9"]).is_err());
    assert!(ChartOptions::from_args(["--moving-average=0"]).is_err());
    assert!(matches!(
        ChartOptions::default().with_size(0, 500).validate(),
        Err(ChartError::InvalidViewport { .. })
    ));
    assert!(
        ChartOptions::default()
            .with_axis_area_width(600)
            .validate()
            .is_err()
    );
    assert!(
        ChartOptions::default()
            .with_max_markers(0, 10)
            .validate()
            .is_err()
    );
    assert!(
        ChartOptions::default()
            .with_gap_bridging(true, Some(-1.0))
            .validate()
            .is_err()
    );
}

#[test]
fn builders_set_every_field() {
    let options = ChartOptions::default()
        .with_size(640, 320)
        .with_axis_area_width(20)
        .with_spread(95.0, 1.5)
        .with_max_average_quotient(4.0)
        .with_moving_average(Some(3))
        .with_title("Heat pump")
        .with_max_markers(12, 6)
        .with_gap_bridging(false, Some(60.0))
        .with_compress_outliers(true);

    options.validate().expect("valid options");
    let selector = options.range_selector().expect("selector");
    assert_eq!(selector.spread_range(), 95.0);
    assert_eq!(selector.spread_factor(), 1.5);
    assert_eq!(selector.max_average_quotient(), 4.0);
    assert_eq!((options.x_max_markers, options.y_max_markers), (12, 6));
    assert!(!options.bridge_gaps);
    assert_eq!(options.gap_floor, Some(60.0));
    assert!(options.compress_outliers);
}

#[test]
fn json_options_fill_missing_fields_with_defaults() {
    let options = ChartOptions::from_json_str(r#"{ "width": 640, "title": "Solar" }"#)
        .expect("valid json");
    assert_eq!(options.width, 640);
    assert_eq!(options.height, DEFAULT_HEIGHT);
    assert_eq!(options.title, "Solar");

    let json = options.to_json_pretty().expect("json");
    let parsed = ChartOptions::from_json_str(&json).expect("parse back");
    assert_eq!(parsed, options);
}

#[test]
fn invalid_json_options_are_rejected() {
    assert!(matches!(
        ChartOptions::from_json_str("{ not json"),
        Err(ChartError::InvalidConfiguration(_))
    ));
    assert!(ChartOptions::from_json_str(r#"{ "spread_range": 10.0 }"#).is_err());
}
