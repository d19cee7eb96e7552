use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::step_ladder::StepLadder;
use crate::core::value::ValueKind;

pub const DEFAULT_X_MAX_MARKERS: usize = 20;
pub const DEFAULT_Y_MAX_MARKERS: usize = 10;

/// Upper bound on ladder moves; the walk normally settles within a few rungs.
const MAX_FIT_ITERATIONS: usize = 128;

/// Where the markers of one axis fall: `start + i * step` for `i in 0..count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub start: f64,
    pub step: f64,
    pub count: usize,
}

impl AxisScale {
    /// Computes round markers for the band `min..=max`.
    ///
    /// The step starts from the one-significant-digit value of
    /// `range / max_markers` (or the kind-specific default for dates, times
    /// and integers) and then walks the kind's [`StepLadder`] until the marker
    /// count lies in `(max_markers / 2, max_markers]`. Integer steps never drop
    /// below 1, so a very narrow integer band may get fewer markers.
    #[must_use]
    pub fn compute(min: f64, max: f64, kind: ValueKind, max_markers: usize) -> Self {
        let max_markers = max_markers.max(1);
        let range = max - min;
        if !range.is_finite() || range <= 0.0 {
            return Self {
                start: if min.is_finite() { min } else { 0.0 },
                step: 1.0,
                count: 1,
            };
        }

        let ladder = StepLadder::for_kind(kind);
        let mut step = ladder.snap(initial_step(range, kind, max_markers));
        let mut went_up = false;
        let mut went_down = false;
        for _ in 0..MAX_FIT_ITERATIONS {
            let count = marker_count(range, step);
            if count > max_markers {
                step = ladder.next_up(step);
                went_up = true;
            } else if 2 * count <= max_markers && !went_up {
                match ladder.next_down(step) {
                    Some(smaller) => {
                        step = smaller;
                        went_down = true;
                    }
                    None => break,
                }
            } else {
                break;
            }
        }

        let start = (min / step).floor() * step;
        let count = marker_count(range, step);
        trace!(min, max, ?kind, step, count, went_down, "axis scale computed");
        Self { start, step, count }
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(|index| self.value_at(index))
    }

    /// Labels for every marker, formatted by `kind`.
    #[must_use]
    pub fn labels(&self, kind: ValueKind, relative_base: Option<f64>) -> Vec<String> {
        self.values()
            .map(|value| kind.axis_label(value, relative_base))
            .collect()
    }
}

/// `floor((range + 0.9 * step) / step)`; the 0.9 keeps a marker that lands
/// on the band end despite rounding.
#[must_use]
pub fn marker_count(range: f64, step: f64) -> usize {
    let count = ((range + 0.9 * step) / step).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

fn initial_step(range: f64, kind: ValueKind, max_markers: usize) -> f64 {
    match kind {
        ValueKind::Date | ValueKind::DateTime => {
            if range > 20.0 {
                range * 0.1
            } else if range > 10.0 {
                1.0
            } else if range > 5.0 {
                0.5
            } else if range > 1.0 {
                1.0 / 12.0
            } else {
                1.0 / 24.0
            }
        }
        ValueKind::Time => {
            if range > 20.0 {
                2.0
            } else if range > 10.0 {
                1.0
            } else {
                0.5
            }
        }
        ValueKind::Int => one_significant_digit(range / max_markers as f64).round().max(1.0),
        ValueKind::Float => one_significant_digit(range / max_markers as f64),
    }
}

/// Rounds to one significant digit, e.g. `0.137 -> 0.1`, `2_650.0 -> 3_000.0`.
#[must_use]
pub fn one_significant_digit(value: f64) -> f64 {
    let rounded = format!("{value:.0e}")
        .parse::<f64>()
        .unwrap_or(value);
    if rounded > 0.0 { rounded } else { value }
}
