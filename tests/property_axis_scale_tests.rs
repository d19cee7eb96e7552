use powerchart::core::{AxisScale, ValueKind};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = ValueKind> {
    prop_oneof![
        Just(ValueKind::Float),
        Just(ValueKind::Date),
        Just(ValueKind::DateTime),
        Just(ValueKind::Time),
    ]
}

proptest! {
    #[test]
    fn marker_count_fits_the_requested_band_property(
        min in -1_000.0f64..1_000.0,
        range in 0.01f64..1_000.0,
        kind in kind_strategy(),
        max_markers in 2usize..40
    ) {
        let scale = AxisScale::compute(min, min + range, kind, max_markers);

        prop_assert!(scale.step > 0.0);
        prop_assert!(scale.count <= max_markers);
        prop_assert!(2 * scale.count > max_markers);
        prop_assert!(scale.start <= min + scale.step * 1e-9);
    }

    #[test]
    fn integer_steps_are_whole_numbers_property(
        min in -10_000i32..10_000,
        range in 1i32..10_000,
        max_markers in 2usize..40
    ) {
        let (min, max) = (f64::from(min), f64::from(min + range));
        let scale = AxisScale::compute(min, max, ValueKind::Int, max_markers);

        prop_assert!(scale.step >= 1.0);
        prop_assert_eq!(scale.step.fract(), 0.0);
        prop_assert!(scale.count <= max_markers);
    }
}
