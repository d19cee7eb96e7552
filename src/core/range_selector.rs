use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::series::{Series, SeriesAttributes, SeriesStats};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_SPREAD_RANGE: f64 = 90.0;
pub const DEFAULT_SPREAD_FACTOR: f64 = 1.1;
pub const DEFAULT_MAX_AVERAGE_QUOTIENT: f64 = 1.0;

/// Chooses the visible `(min, max)` band of a series, trimming outliers.
///
/// `spread_range` is the percentage of samples meant to stay inside the band.
/// Trimmed extremes are re-admitted when the band already covers most of the
/// dynamic range (`spread_factor`), and trimming is dropped altogether when
/// the band maximum sits far above the average (`max_average_quotient`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSelector {
    spread_range: f64,
    spread_factor: f64,
    max_average_quotient: f64,
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self {
            spread_range: DEFAULT_SPREAD_RANGE,
            spread_factor: DEFAULT_SPREAD_FACTOR,
            max_average_quotient: DEFAULT_MAX_AVERAGE_QUOTIENT,
        }
    }
}

impl RangeSelector {
    pub fn new(spread_range: f64, spread_factor: f64, max_average_quotient: f64) -> ChartResult<Self> {
        if !(50.0..=100.0).contains(&spread_range) {
            return Err(ChartError::InvalidConfiguration(format!(
                "spread range must be within 50..=100, found {spread_range}"
            )));
        }
        if !spread_factor.is_finite() || spread_factor < 1.0 {
            return Err(ChartError::InvalidConfiguration(format!(
                "spread factor must be >= 1, found {spread_factor}"
            )));
        }
        if !max_average_quotient.is_finite() || max_average_quotient < 1.0 {
            return Err(ChartError::InvalidConfiguration(format!(
                "max average quotient must be >= 1, found {max_average_quotient}"
            )));
        }

        Ok(Self {
            spread_range,
            spread_factor,
            max_average_quotient,
        })
    }

    #[must_use]
    pub fn spread_range(self) -> f64 {
        self.spread_range
    }

    #[must_use]
    pub fn spread_factor(self) -> f64 {
        self.spread_factor
    }

    #[must_use]
    pub fn max_average_quotient(self) -> f64 {
        self.max_average_quotient
    }

    /// Number of samples kept in each bounded heap: the trimmed share plus one,
    /// so the band edge is the first sample past the excluded ones.
    #[must_use]
    pub fn excluded_count(self, len: usize) -> usize {
        let excluded = len as f64 * (100.0 - self.spread_range) / 100.0;
        excluded.round() as usize + 1
    }

    /// Computes the trimmed band and average, `None` for an empty series.
    #[must_use]
    pub fn select(self, values: &[f64], attributes: SeriesAttributes) -> Option<SeriesStats> {
        let (global_min, global_max) = global_extrema(values)?;
        let average = average(values, attributes.zero_excluded_from_average);

        if self.spread_range >= 100.0 {
            return Some(SeriesStats {
                min: global_min,
                max: global_max,
                average,
            });
        }

        let keep = self.excluded_count(values.len());
        let mut largest: BinaryHeap<Reverse<OrderedFloat<f64>>> = BinaryHeap::with_capacity(keep + 1);
        let mut smallest: BinaryHeap<OrderedFloat<f64>> = BinaryHeap::with_capacity(keep + 1);
        let mut considered: Option<(f64, f64)> = None;
        let mut sum = 0.0;

        for &value in values {
            sum += value;
            if attributes.ignore_zero && value == 0.0 {
                continue;
            }
            considered = Some(match considered {
                None => (value, value),
                Some((min, max)) => (min.min(value), max.max(value)),
            });
            largest.push(Reverse(OrderedFloat(value)));
            if largest.len() > keep {
                largest.pop();
            }
            smallest.push(OrderedFloat(value));
            if smallest.len() > keep {
                smallest.pop();
            }
        }

        // Every sample was an ignored zero.
        let (Some(Reverse(OrderedFloat(mut max))), Some(OrderedFloat(mut min)), Some((outer_min, outer_max))) =
            (largest.peek().copied(), smallest.peek().copied(), considered)
        else {
            return Some(SeriesStats {
                min: global_min,
                max: global_max,
                average,
            });
        };

        // Too few samples for the trim: the heaps overlap past the median.
        if min > max {
            min = outer_min;
            max = outer_max;
        }

        let distance = max - min;
        if outer_max - min <= distance * self.spread_factor {
            max = outer_max;
        }
        if max - outer_min <= distance * self.spread_factor {
            min = outer_min;
        }
        if sum > 0.0 && average != 0.0 && max / average > self.max_average_quotient {
            min = outer_min;
            max = outer_max;
        }

        trace!(
            len = values.len(),
            keep,
            min,
            max,
            average,
            "range selected"
        );
        Some(SeriesStats { min, max, average })
    }

    /// Runs [`Self::select`] on the series and stores the result in it.
    pub fn apply(self, series: &mut Series) -> Option<SeriesStats> {
        let stats = self.select(series.values(), series.attributes())?;
        series.set_stats(stats);
        Some(stats)
    }

    /// Stores the untrimmed band; used for the x series.
    pub fn apply_full_range(series: &mut Series) -> Option<SeriesStats> {
        let (min, max) = series.global_extrema()?;
        let stats = SeriesStats {
            min,
            max,
            average: average(series.values(), false),
        };
        series.set_stats(stats);
        Some(stats)
    }
}

fn global_extrema(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    }))
}

fn average(values: &[f64], exclude_zero: bool) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|value| !exclude_zero || **value != 0.0)
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
