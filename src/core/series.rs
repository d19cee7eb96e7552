use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::value::{RawValue, TypedValue, ValueKind, ValueType, infer_value};
use crate::error::{ChartError, ChartResult};

/// Behaviour flags attached to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesAttributes {
    /// Zero samples never drive the trimmed range.
    pub ignore_zero: bool,
    /// Zero samples count neither in the sum nor in the count of the average.
    pub zero_excluded_from_average: bool,
    /// Numeric axis labels are shown relative to the first sample.
    pub relative_to_start: bool,
    /// The legend's last column shows the latest sample minus the first one.
    pub last_is_diff: bool,
}

impl SeriesAttributes {
    pub const IGNORE_ZERO: &'static str = "ignore-0";
    pub const ZERO_EXCLUDED_FROM_AVERAGE: &'static str = "0-exclude-from-average";
    pub const RELATIVE_TO_START: &'static str = "relative-to-start";
    pub const LAST_IS_DIFF: &'static str = "last-is-diff";

    /// Parses a free-form attribute string; every flag name found in it is set.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            ignore_zero: text.contains(Self::IGNORE_ZERO),
            zero_excluded_from_average: text.contains(Self::ZERO_EXCLUDED_FROM_AVERAGE),
            relative_to_start: text.contains(Self::RELATIVE_TO_START),
            last_is_diff: text.contains(Self::LAST_IS_DIFF),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::default()
    }
}

impl fmt::Display for SeriesAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.ignore_zero, Self::IGNORE_ZERO),
            (self.zero_excluded_from_average, Self::ZERO_EXCLUDED_FROM_AVERAGE),
            (self.relative_to_start, Self::RELATIVE_TO_START),
            (self.last_is_diff, Self::LAST_IS_DIFF),
        ];
        let mut first = true;
        for (set, name) in names {
            if !set {
                continue;
            }
            if !first {
                f.write_str(",")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

/// Range and average of a series in stored (unfactored) units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Unit factor derived from byte-size cues in a title.
#[must_use]
pub fn unit_factor_for_title(title: &str) -> f64 {
    if title.contains("GByte") {
        (1u64 << 30) as f64
    } else if title.contains("MByte") {
        (1u64 << 20) as f64
    } else if title.contains("KByte") {
        (1u64 << 10) as f64
    } else {
        1.0
    }
}

/// One named column of samples: the x axis or one measured quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    title: String,
    kind: Option<ValueKind>,
    unit_factor: f64,
    stroke_width: u32,
    display_type: Option<ValueType>,
    attributes: SeriesAttributes,
    comment: String,
    values: Vec<f64>,
    #[serde(default)]
    stats: Option<SeriesStats>,
    #[serde(default)]
    reduced_range: Option<f64>,
}

impl Series {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            unit_factor: unit_factor_for_title(&title),
            title,
            kind: None,
            stroke_width: 1,
            display_type: None,
            attributes: SeriesAttributes::default(),
            comment: String::new(),
            values: Vec::new(),
            stats: None,
            reduced_range: None,
        }
    }

    /// Builds a series from `title[;strokeWidth[;displayType[;attributes[;comment]]]]`.
    pub fn from_header_token(token: &str) -> ChartResult<Self> {
        let mut parts = token.split(';');
        let title = parts.next().unwrap_or_default().trim();
        let mut series = Self::new(title);

        if let Some(width) = parts.next().map(str::trim).filter(|w| !w.is_empty()) {
            let width = width.parse::<u32>().map_err(|_| {
                ChartError::InvalidData(format!(
                    "series `{title}`: stroke width must be a positive integer, found `{width}`"
                ))
            })?;
            series = series.with_stroke_width(width);
        }
        if let Some(display) = parts.next() {
            let display_type = ValueType::from_name(display);
            if display_type != ValueType::Undefined {
                series = series.with_display_type(display_type);
            }
        }
        if let Some(attributes) = parts.next() {
            series = series.with_attributes(SeriesAttributes::parse(attributes));
        }
        if let Some(comment) = parts.next() {
            series = series.with_comment(comment.trim());
        }
        Ok(series)
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width.max(1);
        self
    }

    #[must_use]
    pub fn with_display_type(mut self, display_type: ValueType) -> Self {
        self.display_type = Some(display_type);
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: SeriesAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The kind established by the first sample, `None` while empty.
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.kind.map_or(ValueType::Undefined, ValueKind::value_type)
    }

    #[must_use]
    pub fn display_type(&self) -> Option<ValueType> {
        self.display_type
    }

    /// Kind used for labels: the display override when it names a numeric
    /// kind, otherwise the stored kind.
    #[must_use]
    pub fn label_kind(&self) -> ValueKind {
        self.display_type
            .and_then(ValueKind::from_value_type)
            .or(self.kind)
            .unwrap_or(ValueKind::Float)
    }

    #[must_use]
    pub fn unit_factor(&self) -> f64 {
        self.unit_factor
    }

    #[must_use]
    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    #[must_use]
    pub fn attributes(&self) -> SeriesAttributes {
        self.attributes
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses and appends one sample.
    ///
    /// The first sample fixes the series kind; later samples must agree,
    /// except that integers and floats mix freely (the series widens to float).
    pub fn add<'a>(&mut self, raw: impl Into<RawValue<'a>>) -> ChartResult<()> {
        let typed = self.accept(raw.into())?;
        self.push_typed(typed);
        Ok(())
    }

    /// Checks a sample without storing it; the returned kind is the series
    /// kind after the sample would be added.
    pub fn accept(&self, raw: RawValue<'_>) -> ChartResult<TypedValue> {
        let Some(typed) = infer_value(raw) else {
            return Err(ChartError::UnparsableValue {
                series: self.title.clone(),
                value: raw.to_string(),
            });
        };

        let kind = match self.kind {
            None => typed.kind,
            Some(established) => {
                established
                    .merge(typed.kind)
                    .ok_or_else(|| ChartError::TypeMismatch {
                        series: self.title.clone(),
                        expected: established.value_type(),
                        found: typed.kind.value_type(),
                    })?
            }
        };
        Ok(TypedValue {
            value: typed.value,
            kind,
        })
    }

    /// Stores a sample previously checked by [`Self::accept`].
    pub(crate) fn push_typed(&mut self, typed: TypedValue) {
        self.kind = Some(typed.kind);
        self.values.push(typed.value);
        self.invalidate();
    }

    /// Stored samples, not divided by the unit factor.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access for in-place transformations; drops computed statistics.
    pub(crate) fn values_mut(&mut self) -> &mut Vec<f64> {
        self.invalidate();
        &mut self.values
    }

    pub(crate) fn replace_values(&mut self, values: Vec<f64>) {
        self.invalidate();
        self.values = values;
    }

    fn invalidate(&mut self) {
        self.stats = None;
        self.reduced_range = None;
    }

    /// Sample at `index` divided by the unit factor.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).map(|value| value / self.unit_factor)
    }

    #[must_use]
    pub fn first(&self) -> Option<f64> {
        self.value(0)
    }

    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.values.len().checked_sub(1).and_then(|last| self.value(last))
    }

    /// Formats the sample at `index` according to the series kind.
    #[must_use]
    pub fn format_value(&self, index: usize) -> Option<String> {
        let value = self.value(index)?;
        Some(self.kind.unwrap_or(ValueKind::Float).display(value, None))
    }

    /// Smallest and largest stored sample, ignoring any trimming.
    #[must_use]
    pub fn global_extrema(&self) -> Option<(f64, f64)> {
        let mut iter = self.values.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        }))
    }

    #[must_use]
    pub fn stats(&self) -> Option<SeriesStats> {
        self.stats
    }

    pub(crate) fn set_stats(&mut self, stats: SeriesStats) {
        self.stats = Some(stats);
    }

    fn require_stats(&self) -> ChartResult<SeriesStats> {
        self.stats.ok_or_else(|| ChartError::RangeNotComputed {
            series: self.title.clone(),
        })
    }

    /// Average over the samples, divided by the unit factor.
    pub fn average(&self) -> ChartResult<f64> {
        Ok(self.require_stats()?.average / self.unit_factor)
    }

    /// Trimmed minimum (`is_min`) or maximum, divided by the unit factor.
    pub fn extremum(&self, is_min: bool) -> ChartResult<f64> {
        let stats = self.require_stats()?;
        let raw = if is_min { stats.min } else { stats.max };
        Ok(raw / self.unit_factor)
    }

    pub fn range(&self) -> ChartResult<f64> {
        let stats = self.require_stats()?;
        Ok((stats.max - stats.min) / self.unit_factor)
    }

    /// Computes the outlier-compressed normalisation basis
    /// `average + max(std_dev, average)` in factored units.
    pub fn compute_reduced_range(&mut self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let count = self.values.len() as f64;
        let average = self.values.iter().sum::<f64>() / count;
        let variance = self
            .values
            .iter()
            .map(|value| (value - average).powi(2))
            .sum::<f64>()
            / count;
        let reduced = (average + variance.sqrt().max(average)) / self.unit_factor;
        self.reduced_range = Some(reduced);
        Some(reduced)
    }

    #[must_use]
    pub fn reduced_range(&self) -> Option<f64> {
        self.reduced_range
    }
}
