use powerchart::ChartError;
use powerchart::core::{RangeSelector, Series, SeriesAttributes, SeriesStats};

fn select(values: &[f64], spread: f64, factor: f64, quotient: f64) -> SeriesStats {
    RangeSelector::new(spread, factor, quotient)
        .expect("valid selector")
        .select(values, SeriesAttributes::default())
        .expect("non-empty values")
}

#[test]
fn single_spike_is_trimmed() {
    let stats = select(&[10.0, 10.0, 90.0, 10.0, 10.0], 80.0, 1.1, 1.0);
    assert_eq!((stats.min, stats.max), (10.0, 10.0));
    assert!((stats.average - 26.0).abs() <= 1e-12);
}

#[test]
fn max_average_quotient_restores_the_full_range() {
    let stats = select(&[10.0, 20.0, 90.0, 30.0, 40.0], 80.0, 1.1, 1.0);
    assert_eq!((stats.min, stats.max), (10.0, 90.0));
}

#[test]
fn larger_quotient_keeps_the_trimmed_band() {
    let stats = select(&[10.0, 20.0, 90.0, 30.0, 40.0], 80.0, 1.1, 2.0);
    assert_eq!((stats.min, stats.max), (20.0, 40.0));
}

#[test]
fn spread_factor_readmits_extremes_close_to_the_band() {
    let stats = select(&[10.0, 20.0, 90.0, 30.0, 40.0], 80.0, 4.0, 3.0);
    assert_eq!((stats.min, stats.max), (10.0, 90.0));
}

#[test]
fn full_spread_uses_global_extrema() {
    let stats = select(&[3.0, -2.0, 7.0, 1.0], 100.0, 1.1, 1.0);
    assert_eq!((stats.min, stats.max), (-2.0, 7.0));
}

#[test]
fn excluded_count_rounds_the_trimmed_share() {
    let selector = RangeSelector::new(80.0, 1.1, 1.0).expect("valid selector");
    assert_eq!(selector.excluded_count(5), 2);

    let selector = RangeSelector::default();
    assert_eq!(selector.excluded_count(10), 2);
    assert_eq!(selector.excluded_count(7), 2);
    assert_eq!(selector.excluded_count(100), 11);
}

#[test]
fn ignore_zero_keeps_zeros_out_of_the_band() {
    let values = [0.0, 0.0, 0.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0];
    let selector = RangeSelector::new(90.0, 1.1, 2.0).expect("valid selector");

    let plain = selector
        .select(&values, SeriesAttributes::default())
        .expect("stats");
    assert_eq!((plain.min, plain.max), (0.0, 13.0));

    let attributes = SeriesAttributes {
        ignore_zero: true,
        ..SeriesAttributes::default()
    };
    let ignoring = selector.select(&values, attributes).expect("stats");
    assert_eq!((ignoring.min, ignoring.max), (6.0, 12.0));
    assert!((ignoring.average - 81.0 / 12.0).abs() <= 1e-12);
}

#[test]
fn zero_exclusion_only_changes_the_average() {
    let values = [0.0, 0.0, 4.0, 8.0];
    let selector = RangeSelector::new(100.0, 1.1, 1.0).expect("valid selector");

    let plain = selector
        .select(&values, SeriesAttributes::default())
        .expect("stats");
    assert!((plain.average - 3.0).abs() <= 1e-12);

    let attributes = SeriesAttributes {
        zero_excluded_from_average: true,
        ..SeriesAttributes::default()
    };
    let excluding = selector.select(&values, attributes).expect("stats");
    assert!((excluding.average - 6.0).abs() <= 1e-12);
    assert_eq!((excluding.min, excluding.max), (0.0, 8.0));
}

#[test]
fn all_zero_series_falls_back_to_global_extrema() {
    let attributes = SeriesAttributes {
        ignore_zero: true,
        zero_excluded_from_average: true,
        ..SeriesAttributes::default()
    };
    let stats = RangeSelector::default()
        .select(&[0.0, 0.0, 0.0], attributes)
        .expect("stats");
    assert_eq!((stats.min, stats.max, stats.average), (0.0, 0.0, 0.0));
}

#[test]
fn empty_series_has_no_range() {
    assert!(
        RangeSelector::default()
            .select(&[], SeriesAttributes::default())
            .is_none()
    );

    let mut series = Series::new("empty");
    assert!(RangeSelector::default().apply(&mut series).is_none());
    assert!(matches!(
        series.extremum(false),
        Err(ChartError::RangeNotComputed { .. })
    ));
}

#[test]
fn apply_stores_stats_and_uses_series_attributes() {
    let mut series = Series::new("load").with_attributes(SeriesAttributes::parse("ignore-0"));
    for value in [0.0, 0.0, 0.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0] {
        series.add(value).expect("sample");
    }
    RangeSelector::new(90.0, 1.1, 2.0)
        .expect("valid selector")
        .apply(&mut series)
        .expect("stats");

    assert_eq!(series.extremum(true).expect("min"), 6.0);
    assert_eq!(series.extremum(false).expect("max"), 12.0);
    assert_eq!(series.range().expect("range"), 6.0);
}

#[test]
fn invalid_parameters_are_rejected() {
    for (spread, factor, quotient) in [
        (40.0, 1.1, 1.0),
        (101.0, 1.1, 1.0),
        (90.0, 0.5, 1.0),
        (90.0, 1.1, 0.5),
        (90.0, f64::NAN, 1.0),
    ] {
        assert!(matches!(
            RangeSelector::new(spread, factor, quotient),
            Err(ChartError::InvalidConfiguration(_))
        ));
    }
}
