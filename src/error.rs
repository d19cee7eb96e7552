use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::core::ValueType;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series `{series}`: unparsable value `{value}`")]
    UnparsableValue { series: String, value: String },

    #[error("series `{series}`: mixed data types: {found} / {expected}")]
    TypeMismatch {
        series: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("wrong column number in line {line}: {found} instead of {expected}")]
    ColumnCountMismatch {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("series `{series}`: min/max/average requested before the range was computed")]
    RangeNotComputed { series: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("delimited input: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    /// Whether the error aborts a chart build instead of being logged and skipped.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ColumnCountMismatch { .. })
    }
}

/// Default number of entries an [`ErrorLog`] keeps before dropping new ones.
pub const ERROR_LOG_DEFAULT_CAPACITY: usize = 100;

/// Bounded accumulator of failures met during a best-effort chart build.
///
/// Every recorded entry is also emitted as a `tracing` warning, so hosts that
/// only watch logs see the same information as hosts inspecting the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLog {
    entries: Vec<String>,
    capacity: usize,
    dropped: usize,
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::with_capacity(ERROR_LOG_DEFAULT_CAPACITY)
    }
}

impl ErrorLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    pub fn record(&mut self, error: &ChartError) {
        warn!(error = %error, fatal = error.is_fatal(), "chart error recorded");
        self.push(error.to_string());
    }

    pub fn record_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(message = %message, "chart error recorded");
        self.push(message);
    }

    fn push(&mut self, message: String) {
        if self.entries.len() < self.capacity {
            self.entries.push(message);
        } else {
            self.dropped += 1;
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries discarded because the log was full.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
