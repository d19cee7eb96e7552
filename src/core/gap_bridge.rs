use smallvec::SmallVec;
use tracing::debug;

use crate::core::series::Series;
use crate::core::value::ValueKind;

const GAP_TOLERANCE: f64 = 1e-9;

/// Indices `i` whose segment `i -> i + 1` needs bridging.
pub type GapIndices = SmallVec<[usize; 16]>;

/// Breaks polylines across sampling gaps by dropping to zero and back.
///
/// The reference gap is the smallest positive x step, never below `floor`.
/// A segment is bridged when it is longer than that gap: two points with every
/// y at zero are inserted one reference gap inside each end, in ascending x
/// order. Segments already at zero on both ends in every y series are left
/// alone. Segments touching such a zero point do not count towards the
/// reference gap, so the bridge points of one pass cannot shrink it and a
/// second pass is a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapBridge {
    floor: f64,
}

impl GapBridge {
    #[must_use]
    pub fn new(floor: f64) -> Self {
        Self {
            floor: if floor.is_finite() { floor.max(0.0) } else { 0.0 },
        }
    }

    /// Floor of five minutes in the native units of `kind`.
    #[must_use]
    pub fn for_kind(kind: ValueKind) -> Self {
        Self::new(kind.five_minutes())
    }

    #[must_use]
    pub fn floor(self) -> f64 {
        self.floor
    }

    /// Reference gap for the given columns, `None` without a usable segment.
    #[must_use]
    pub fn min_gap<S: AsRef<[f64]>>(self, x: &[f64], ys: &[S]) -> Option<f64> {
        x.windows(2)
            .enumerate()
            .filter(|(index, _)| !touches_baseline(ys, *index))
            .map(|(_, pair)| pair[1] - pair[0])
            .filter(|delta| delta.is_finite() && *delta > 0.0)
            .min_by(f64::total_cmp)
            .map(|delta| delta.max(self.floor))
    }

    /// Segments that need bridging, in ascending order, with the reference gap.
    #[must_use]
    pub fn find_gaps<S: AsRef<[f64]>>(self, x: &[f64], ys: &[S]) -> Option<(f64, GapIndices)> {
        let min_gap = self.min_gap(x, ys)?;
        let threshold = min_gap * (1.0 + GAP_TOLERANCE);
        let gaps = x
            .windows(2)
            .enumerate()
            .filter(|(index, pair)| pair[1] - pair[0] > threshold && !is_baseline(ys, *index))
            .map(|(index, _)| index)
            .collect();
        Some((min_gap, gaps))
    }

    /// Bridges every gap of `x` across all y series; returns the number of gaps bridged.
    pub fn apply(self, x: &mut Series, ys: &mut [Series]) -> usize {
        let found = {
            let columns: Vec<&[f64]> = ys.iter().map(Series::values).collect();
            self.find_gaps(x.values(), &columns)
        };
        let Some((min_gap, gaps)) = found else {
            return 0;
        };
        if gaps.is_empty() {
            return 0;
        }

        let xs = x.values_mut();
        // Back to front so the collected indices stay valid.
        for &index in gaps.iter().rev() {
            let leave = xs[index] + min_gap;
            let rejoin = xs[index + 1] - min_gap;
            xs.insert(index + 1, leave.max(rejoin));
            xs.insert(index + 1, leave.min(rejoin));
        }
        for series in ys.iter_mut() {
            let values = series.values_mut();
            for &index in gaps.iter().rev() {
                if index < values.len() {
                    values.insert(index + 1, 0.0);
                    values.insert(index + 1, 0.0);
                }
            }
        }

        debug!(gaps = gaps.len(), min_gap, points = x.len(), "gaps bridged");
        gaps.len()
    }
}

fn is_baseline<S: AsRef<[f64]>>(ys: &[S], index: usize) -> bool {
    at_zero(ys, index) && at_zero(ys, index + 1)
}

fn touches_baseline<S: AsRef<[f64]>>(ys: &[S], index: usize) -> bool {
    at_zero(ys, index) || at_zero(ys, index + 1)
}

/// Every y series is zero at `index`.
fn at_zero<S: AsRef<[f64]>>(ys: &[S], index: usize) -> bool {
    ys.iter().all(|column| column.as_ref().get(index) == Some(&0.0))
}
