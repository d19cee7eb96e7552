use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Whole days between 1970-01-01 and `date`, as stored by date series.
#[must_use]
pub fn days_since_epoch(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
    (date - epoch).num_days() as f64
}

/// Replaces a zero or non-finite span by `epsilon` so divisions stay finite.
#[must_use]
pub fn non_degenerate_span(span: f64, epsilon: f64) -> f64 {
    if span.is_finite() && span.abs() >= epsilon {
        span
    } else {
        epsilon
    }
}
