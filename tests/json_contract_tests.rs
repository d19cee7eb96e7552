use powerchart::api::{CHART_FRAME_JSON_SCHEMA_V1, ChartFrameJsonContractV1, read_chart_str};
use powerchart::render::ChartFrame;
use powerchart::{ChartOptions, ChartPipeline};

fn frame() -> ChartFrame {
    let chart = read_chart_str("x;y\n0;1\n1;3\n2;2\n3;5\n").expect("chart");
    ChartPipeline::new(ChartOptions::default())
        .expect("pipeline")
        .render(chart)
        .expect("frame")
}

#[test]
fn versioned_contract_carries_the_schema_version() {
    let json = frame().to_json_contract_v1_pretty().expect("json");
    let payload: ChartFrameJsonContractV1 = serde_json::from_str(&json).expect("payload");

    assert_eq!(payload.schema_version, CHART_FRAME_JSON_SCHEMA_V1);
    assert_eq!(payload.frame.series.len(), 1);
    assert_eq!(payload.frame.x_legend.count, 4);
}

#[test]
fn bare_and_versioned_payloads_are_both_accepted() {
    let frame = frame();

    let bare = frame.to_json_pretty().expect("bare json");
    let parsed = ChartFrame::from_json_compat_str(&bare).expect("bare frame");
    assert_eq!(parsed.legend, frame.legend);
    assert_eq!(parsed.x_axis.markers.len(), frame.x_axis.markers.len());

    let versioned = frame.to_json_contract_v1_pretty().expect("versioned json");
    let parsed = ChartFrame::from_json_compat_str(&versioned).expect("versioned frame");
    assert_eq!(parsed.title, frame.title);
    assert_eq!(parsed.series[0].points.len(), 4);
}

#[test]
fn unknown_schema_versions_are_rejected() {
    let json = frame().to_json_contract_v1_pretty().expect("json");
    let mut value: serde_json::Value = serde_json::from_str(&json).expect("value");
    value["schema_version"] = serde_json::Value::from(2);

    let err = ChartFrame::from_json_compat_str(&value.to_string()).expect_err("unsupported");
    assert!(err.to_string().contains("unsupported frame schema version: 2"));
}

#[test]
fn garbage_is_rejected() {
    assert!(ChartFrame::from_json_compat_str("[1, 2, 3]").is_err());
}
