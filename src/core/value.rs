use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{SECONDS_PER_DAY, SECONDS_PER_HOUR, days_since_epoch};

/// Semantic type names as they appear in header metadata and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Float,
    Date,
    DateTime,
    Time,
    #[default]
    Undefined,
}

impl ValueType {
    /// Maps a metadata name (`"int"`, `"datetime"`, ...) to a type.
    ///
    /// Unknown names map to [`ValueType::Undefined`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "int" => Self::Int,
            "float" => Self::Float,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "time" => Self::Time,
            _ => Self::Undefined,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric storage kind of a series.
///
/// Every stored sample is an `f64`; the kind says what that number means
/// and carries the matching formatting rules:
/// - `Date`/`DateTime`: days since 1970-01-01 (UTC), time of day as fraction
/// - `Time`: hours since midnight, `0.0..24.0`
/// - `Int`: integral values kept as floats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Int,
    Date,
    DateTime,
    Time,
}

impl ValueKind {
    #[must_use]
    pub fn value_type(self) -> ValueType {
        match self {
            Self::Float => ValueType::Float,
            Self::Int => ValueType::Int,
            Self::Date => ValueType::Date,
            Self::DateTime => ValueType::DateTime,
            Self::Time => ValueType::Time,
        }
    }

    /// Returns the numeric kind for a semantic type, `None` for
    /// `String`/`Undefined` which never describe stored samples.
    #[must_use]
    pub fn from_value_type(value_type: ValueType) -> Option<Self> {
        match value_type {
            ValueType::Float => Some(Self::Float),
            ValueType::Int => Some(Self::Int),
            ValueType::Date => Some(Self::Date),
            ValueType::DateTime => Some(Self::DateTime),
            ValueType::Time => Some(Self::Time),
            ValueType::String | ValueType::Undefined => None,
        }
    }

    /// Combines the established kind of a series with the kind of a new sample.
    ///
    /// `Int` widens to `Float` in either direction, any other disagreement
    /// is a mismatch.
    #[must_use]
    pub fn merge(self, incoming: Self) -> Option<Self> {
        match (self, incoming) {
            (a, b) if a == b => Some(a),
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Some(Self::Float),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Float | Self::Int)
    }

    /// Length of one native unit in seconds for clock-like kinds.
    #[must_use]
    pub fn unit_seconds(self) -> Option<f64> {
        match self {
            Self::Date | Self::DateTime => Some(SECONDS_PER_DAY),
            Self::Time => Some(SECONDS_PER_HOUR),
            Self::Float | Self::Int => None,
        }
    }

    /// Five minutes expressed in native units; plain numbers are taken as seconds.
    #[must_use]
    pub fn five_minutes(self) -> f64 {
        match self.unit_seconds() {
            Some(unit) => 300.0 / unit,
            None => 300.0,
        }
    }

    /// Formats an axis marker value.
    ///
    /// `relative_base` shifts numeric labels so they read relative to the
    /// first sample of the series.
    #[must_use]
    pub fn axis_label(self, value: f64, relative_base: Option<f64>) -> String {
        match self {
            Self::Date | Self::DateTime => format_days(value, "%d.%m-%H:%M"),
            Self::Time => format_clock(value),
            Self::Float | Self::Int => {
                let shown = match relative_base {
                    Some(base) => value - base,
                    None => value,
                };
                format_magnitude(shown)
            }
        }
    }

    /// Formats a single value for legends and delimited export.
    #[must_use]
    pub fn display(self, value: f64, precision: Option<usize>) -> String {
        match self {
            Self::Date => format_days(value, "%Y-%m-%d"),
            Self::DateTime => format_days(value, "%Y-%m-%d %H:%M"),
            Self::Time => format_clock(value),
            Self::Int if precision.is_none() && value.fract() == 0.0 => {
                format!("{}", value as i64)
            }
            Self::Float | Self::Int => match precision {
                Some(digits) => format!("{value:.digits$}"),
                None => format!("{value}"),
            },
        }
    }
}

/// Raw sample handed to [`crate::core::Series::add`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Float(f64),
    Int(i64),
    Decimal(Decimal),
    Text(&'a str),
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for RawValue<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for RawValue<'_> {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Decimal> for RawValue<'_> {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl fmt::Display for RawValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A parsed sample: its numeric representation and the kind it was recognised as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypedValue {
    pub value: f64,
    pub kind: ValueKind,
}

impl TypedValue {
    const fn new(value: f64, kind: ValueKind) -> Self {
        Self { value, kind }
    }
}

/// Recognises the kind of a raw sample. First match wins:
/// native number, date (optionally with time of day), time of day,
/// hex/octal/decimal integer, float. Returns `None` when nothing matches.
#[must_use]
pub fn infer_value(raw: RawValue<'_>) -> Option<TypedValue> {
    match raw {
        RawValue::Float(value) => value
            .is_finite()
            .then(|| TypedValue::new(value, ValueKind::Float)),
        RawValue::Int(value) => Some(TypedValue::new(value as f64, ValueKind::Int)),
        RawValue::Decimal(value) => crate::core::primitives::decimal_to_f64(value, "value")
            .ok()
            .map(|value| TypedValue::new(value, ValueKind::Float)),
        RawValue::Text(text) => infer_text(text.trim()),
    }
}

fn infer_text(text: &str) -> Option<TypedValue> {
    if text.is_empty() {
        return None;
    }

    let (date_part, rest) = match text
        .char_indices()
        .find(|(_, c)| c.is_whitespace() || *c == 'T')
    {
        Some((split, separator)) => (&text[..split], text[split + separator.len_utf8()..].trim()),
        None => (text, ""),
    };
    if let Some(date) = parse_date(date_part) {
        let days = days_since_epoch(date);
        if rest.is_empty() {
            return Some(TypedValue::new(days, ValueKind::Date));
        }
        let time = parse_time_of_day(rest)?;
        let seconds = f64::from(time.num_seconds_from_midnight());
        return Some(TypedValue::new(
            days + seconds / SECONDS_PER_DAY,
            ValueKind::DateTime,
        ));
    }

    if let Some(time) = parse_time_of_day(text) {
        let seconds = f64::from(time.num_seconds_from_midnight());
        return Some(TypedValue::new(seconds / SECONDS_PER_HOUR, ValueKind::Time));
    }

    if let Some(value) = parse_integer(text) {
        return Some(TypedValue::new(value as f64, ValueKind::Int));
    }

    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| TypedValue::new(value, ValueKind::Float))
}

fn all_digits(part: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts `yyyy-mm-dd` and `dd.mm.yyyy`.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let iso: Vec<&str> = text.split('-').collect();
    if iso.len() == 3 && all_digits(iso[0], 4, 4) && all_digits(iso[1], 1, 2) && all_digits(iso[2], 1, 2)
    {
        return NaiveDate::from_ymd_opt(iso[0].parse().ok()?, iso[1].parse().ok()?, iso[2].parse().ok()?);
    }

    let dotted: Vec<&str> = text.split('.').collect();
    if dotted.len() == 3
        && all_digits(dotted[0], 1, 2)
        && all_digits(dotted[1], 1, 2)
        && all_digits(dotted[2], 4, 4)
    {
        return NaiveDate::from_ymd_opt(
            dotted[2].parse().ok()?,
            dotted[1].parse().ok()?,
            dotted[0].parse().ok()?,
        );
    }
    None
}

/// Accepts `HH:MM` and `HH:MM:SS`.
fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let parts: Vec<&str> = text.split(':').collect();
    if !(2..=3).contains(&parts.len())
        || !all_digits(parts[0], 1, 2)
        || !parts[1..].iter().all(|part| all_digits(part, 2, 2))
    {
        return None;
    }
    let seconds = match parts.get(2) {
        Some(part) => part.parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_opt(parts[0].parse().ok()?, parts[1].parse().ok()?, seconds)
}

fn parse_integer(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(octal) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        return i64::from_str_radix(octal, 8).ok();
    }
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Whether a header token looks like a bare number (`1`, `-2.5`, `3,5`, `1.0e3`).
#[must_use]
pub fn is_bare_number(token: &str) -> bool {
    let token = token.trim();
    let body = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (integral, fraction) = match body.find(['.', ',']) {
        Some(split) => (&body[..split], Some(&body[split + 1..])),
        None => (body, None),
    };
    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let Some(fraction) = fraction else {
        return true;
    };
    let (digits, exponent) = match fraction.find(['e', 'E']) {
        Some(split) => (&fraction[..split], Some(&fraction[split + 1..])),
        None => (fraction, None),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match exponent {
        None => true,
        Some(exponent) => {
            let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            !exponent.is_empty() && exponent.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

fn format_days(days: f64, pattern: &str) -> String {
    let seconds = (days * SECONDS_PER_DAY).round();
    if !seconds.is_finite() || seconds.abs() > (i64::MAX as f64) {
        return format_magnitude(days);
    }
    match DateTime::<Utc>::from_timestamp(seconds as i64, 0) {
        Some(time) => time.format(pattern).to_string(),
        None => format_magnitude(days),
    }
}

fn format_clock(hours: f64) -> String {
    if !hours.is_finite() {
        return "--:--".to_owned();
    }
    let minutes = (hours * 60.0).round() as i64;
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Magnitude-scaled label: more decimals for small values, `k`/`M` suffixes for large ones.
#[must_use]
pub fn format_magnitude(value: f64) -> String {
    let abs = value.abs();
    let body = if abs < 1.0 {
        format!("{abs:.3}")
    } else if abs < 10.0 {
        format!("{abs:.2}")
    } else if abs < 100.0 {
        format!("{abs:.1}")
    } else if abs < 1_000.0 {
        format!("{abs:.0}")
    } else if abs < 10_000.0 {
        format!("{:.1}k", abs / 1_000.0)
    } else if abs < 100_000.0 {
        format!("{:.0}k", abs / 1_000.0)
    } else if abs < 1_000_000.0 {
        format!("{:.2}M", abs / 1_000_000.0)
    } else if abs < 10_000_000.0 {
        format!("{:.1}M", abs / 1_000_000.0)
    } else {
        three_significant_digits(abs)
    };
    if value < 0.0 { format!("-{body}") } else { body }
}

/// Scientific notation with three significant digits, trailing zeros dropped
/// and a signed two-digit exponent: `12_345_678.0 -> "1.23e+07"`.
fn three_significant_digits(value: f64) -> String {
    let scientific = format!("{value:.2e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}
