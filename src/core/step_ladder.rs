use smallvec::SmallVec;

use crate::core::value::ValueKind;

/// Mantissas of the round decimal steps. Neighbouring rungs differ by at most
/// a factor of 1.5, narrow enough that walking the ladder always finds a step
/// giving between half and all of the requested markers.
const DECIMAL_MULTIPLIERS: [f64; 9] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0];

/// Clock-friendly steps in seconds, from one minute to ten days.
const CLOCK_STEPS_SECONDS: [f64; 30] = [
    60.0, 90.0, 120.0, 180.0, 240.0, 300.0, 360.0, 450.0, 600.0, 900.0, 1_200.0, 1_800.0,
    2_700.0, 3_600.0, 5_400.0, 7_200.0, 10_800.0, 14_400.0, 21_600.0, 28_800.0, 43_200.0,
    64_800.0, 86_400.0, 129_600.0, 172_800.0, 259_200.0, 345_600.0, 432_000.0, 604_800.0,
    864_000.0,
];

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const CLOCK_TABLE_END: f64 = 864_000.0;

const RELATIVE_TOLERANCE: f64 = 1e-9;

type Rungs = SmallVec<[f64; 96]>;

/// Ordered set of "round" marker steps for one kind of value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepLadder {
    /// `{1, 1.5, 2, 2.5, 3, 4, 5, 6, 8} * 10^k`.
    Decimal,
    /// Whole-numbered rungs of the decimal ladder, starting at 1.
    Integer,
    /// Minutes, hours and days; values are in units of `unit_seconds`.
    Clock { unit_seconds: f64 },
}

impl StepLadder {
    #[must_use]
    pub fn for_kind(kind: ValueKind) -> Self {
        match (kind, kind.unit_seconds()) {
            (_, Some(unit_seconds)) => Self::Clock { unit_seconds },
            (ValueKind::Int, None) => Self::Integer,
            _ => Self::Decimal,
        }
    }

    /// Smallest rung at or above `step`.
    #[must_use]
    pub fn snap(self, step: f64) -> f64 {
        let rungs = self.rungs_around(step);
        let floor = step * (1.0 - RELATIVE_TOLERANCE);
        rungs
            .iter()
            .copied()
            .find(|rung| *rung >= floor)
            .unwrap_or(step)
    }

    /// Next rung strictly above `step`.
    #[must_use]
    pub fn next_up(self, step: f64) -> f64 {
        let rungs = self.rungs_around(step);
        let ceiling = step * (1.0 + RELATIVE_TOLERANCE);
        rungs
            .iter()
            .copied()
            .find(|rung| *rung > ceiling)
            .unwrap_or(step * 2.0)
    }

    /// Next rung strictly below `step`, `None` at the bottom of the ladder.
    #[must_use]
    pub fn next_down(self, step: f64) -> Option<f64> {
        let rungs = self.rungs_around(step);
        let floor = step * (1.0 - RELATIVE_TOLERANCE);
        rungs.iter().copied().rev().find(|rung| *rung < floor)
    }

    fn rungs_around(self, step: f64) -> Rungs {
        match self {
            Self::Decimal => decimal_rungs(step),
            Self::Integer => {
                let mut rungs: Rungs = decimal_rungs(step.max(1.0))
                    .into_iter()
                    .filter(|rung| *rung >= 1.0 - RELATIVE_TOLERANCE)
                    .filter(|rung| (rung - rung.round()).abs() <= RELATIVE_TOLERANCE * rung)
                    .map(f64::round)
                    .collect();
                rungs.dedup();
                rungs
            }
            Self::Clock { unit_seconds } => {
                let seconds = step * unit_seconds;
                let mut rungs: Rungs = decimal_rungs(seconds)
                    .into_iter()
                    .filter(|rung| *rung < SECONDS_PER_MINUTE)
                    .collect();
                rungs.extend(CLOCK_STEPS_SECONDS);
                rungs.extend(
                    decimal_rungs(seconds / SECONDS_PER_DAY)
                        .into_iter()
                        .map(|days| days * SECONDS_PER_DAY)
                        .filter(|rung| *rung > CLOCK_TABLE_END),
                );
                rungs.sort_by(f64::total_cmp);
                rungs.iter_mut().for_each(|rung| *rung /= unit_seconds);
                rungs
            }
        }
    }
}

/// Decimal rungs of the decades below, at and above `step`, ascending.
fn decimal_rungs(step: f64) -> Rungs {
    let mut rungs = Rungs::new();
    if !step.is_finite() || step <= 0.0 {
        return rungs;
    }
    let decade = step.log10().floor() as i32;
    for exponent in decade - 1..=decade + 1 {
        for multiplier in DECIMAL_MULTIPLIERS {
            rungs.push(scaled(multiplier, exponent));
        }
    }
    rungs.push(scaled(1.0, decade + 2));
    rungs
}

fn scaled(multiplier: f64, exponent: i32) -> f64 {
    if exponent < 0 {
        multiplier / 10f64.powi(-exponent)
    } else {
        multiplier * 10f64.powi(exponent)
    }
}
