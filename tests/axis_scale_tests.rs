use approx::assert_abs_diff_eq;
use powerchart::core::axis_scale::{marker_count, one_significant_digit};
use powerchart::core::{AxisScale, StepLadder, ValueKind};

#[test]
fn zero_range_yields_a_single_marker() {
    let scale = AxisScale::compute(5.0, 5.0, ValueKind::Float, 10);
    assert_eq!(scale.count, 1);
    assert_eq!(scale.start, 5.0);
    assert_eq!(scale.step, 1.0);
}

#[test]
fn round_float_range_keeps_the_initial_step() {
    let scale = AxisScale::compute(0.0, 100.0, ValueKind::Float, 10);
    assert_abs_diff_eq!(scale.step, 10.0, epsilon = 1e-12);
    assert_eq!(scale.count, 10);
    assert_eq!(scale.start, 0.0);
}

#[test]
fn float_step_walks_up_the_ladder_until_markers_fit() {
    let scale = AxisScale::compute(0.0, 1.37, ValueKind::Float, 10);
    assert_abs_diff_eq!(scale.step, 0.15, epsilon = 1e-12);
    assert!(scale.count > 5 && scale.count <= 10);
}

#[test]
fn start_is_aligned_to_the_step() {
    let scale = AxisScale::compute(3.7, 103.7, ValueKind::Float, 10);
    assert_abs_diff_eq!(scale.step, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(scale.start, 0.0, epsilon = 1e-12);
    assert_eq!(scale.count, 10);
}

#[test]
fn three_day_range_gets_sub_day_steps() {
    let scale = AxisScale::compute(19_000.0, 19_003.0, ValueKind::DateTime, 20);
    assert!(scale.step < 1.0);
    assert_abs_diff_eq!(scale.step, 1.0 / 6.0, epsilon = 1e-12);
    assert_eq!(scale.count, 18);
}

#[test]
fn long_date_range_steps_down_to_fill_markers() {
    let scale = AxisScale::compute(0.0, 30.0, ValueKind::Date, 20);
    assert_abs_diff_eq!(scale.step, 2.0, epsilon = 1e-12);
    assert_eq!(scale.count, 15);
}

#[test]
fn full_day_of_clock_time_uses_hour_steps() {
    let scale = AxisScale::compute(0.0, 24.0, ValueKind::Time, 10);
    assert_abs_diff_eq!(scale.step, 3.0, epsilon = 1e-12);
    assert_eq!(scale.count, 8);
}

#[test]
fn integer_steps_stay_whole() {
    let scale = AxisScale::compute(0.0, 7.0, ValueKind::Int, 10);
    assert_eq!(scale.step, 1.0);
    assert_eq!(scale.count, 7);

    let narrow = AxisScale::compute(0.0, 3.0, ValueKind::Int, 10);
    assert_eq!(narrow.step, 1.0);
    assert_eq!(narrow.count, 3);

    let wide = AxisScale::compute(0.0, 1_000.0, ValueKind::Int, 10);
    assert_eq!(wide.step, 100.0);
    assert_eq!(wide.count, 10);
}

#[test]
fn labels_format_every_marker() {
    let scale = AxisScale {
        start: 0.0,
        step: 500.0,
        count: 3,
    };
    assert_eq!(scale.labels(ValueKind::Float, None), ["0.000", "500", "1.0k"]);

    let clock = AxisScale {
        start: 6.0,
        step: 0.5,
        count: 2,
    };
    assert_eq!(clock.labels(ValueKind::Time, None), ["06:00", "06:30"]);
}

#[test]
fn marker_count_keeps_a_marker_on_the_band_end() {
    assert_eq!(marker_count(100.0, 10.0), 10);
    assert_eq!(marker_count(91.0, 10.0), 10);
    assert_eq!(marker_count(90.0, 10.0), 9);
}

#[test]
fn one_significant_digit_rounds_the_mantissa() {
    assert_abs_diff_eq!(one_significant_digit(0.137), 0.1, epsilon = 1e-15);
    assert_abs_diff_eq!(one_significant_digit(2_650.0), 3_000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(one_significant_digit(7.0), 7.0, epsilon = 1e-12);
}

#[test]
fn decimal_ladder_moves_between_round_steps() {
    let ladder = StepLadder::Decimal;
    assert_abs_diff_eq!(ladder.snap(0.7), 0.8, epsilon = 1e-12);
    assert_abs_diff_eq!(ladder.next_up(8.0), 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ladder.next_up(1.0), 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(ladder.next_down(10.0).expect("rung below"), 8.0, epsilon = 1e-12);
}

#[test]
fn integer_ladder_stops_at_one() {
    let ladder = StepLadder::for_kind(ValueKind::Int);
    assert_eq!(ladder, StepLadder::Integer);
    assert_eq!(ladder.next_up(1.0), 2.0);
    assert_eq!(ladder.next_down(2.0), Some(1.0));
    assert_eq!(ladder.next_down(1.0), None);
}

#[test]
fn clock_ladder_uses_clock_friendly_steps() {
    let hours = StepLadder::for_kind(ValueKind::Time);
    assert_abs_diff_eq!(hours.next_up(1.0), 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(hours.next_up(6.0), 8.0, epsilon = 1e-12);

    let days = StepLadder::for_kind(ValueKind::Date);
    assert_abs_diff_eq!(days.next_up(10.0), 15.0, epsilon = 1e-9);
    assert_abs_diff_eq!(days.snap(1.0 / 12.0), 1.0 / 12.0, epsilon = 1e-12);
}
