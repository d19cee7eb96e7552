use std::io;

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{RawValue, Series, TypedValue};
use crate::error::{ChartError, ChartResult, ErrorLog};
use crate::render::LegendRow;

/// The columns of one chart: an x series, the y series plotted against it,
/// extra legend rows and the failures met while filling them.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    x: Series,
    ys: Vec<Series>,
    legend_rows: Vec<LegendRow>,
    errors: ErrorLog,
    rows_seen: usize,
}

impl Chart {
    #[must_use]
    pub fn new(x: Series, ys: Vec<Series>) -> Self {
        Self {
            x,
            ys,
            legend_rows: Vec::new(),
            errors: ErrorLog::default(),
            rows_seen: 0,
        }
    }

    /// Builds a chart from column series, the first one being the x axis.
    pub fn from_columns(columns: Vec<Series>) -> ChartResult<Self> {
        let mut columns = columns.into_iter();
        let Some(x) = columns.next() else {
            return Err(ChartError::InvalidData(
                "a chart needs at least an x column".to_owned(),
            ));
        };
        Ok(Self::new(x, columns.collect()))
    }

    /// Builds empty columns from header tokens
    /// `title[;strokeWidth[;displayType[;attributes[;comment]]]]`.
    pub fn from_titles<I, S>(titles: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = titles
            .into_iter()
            .map(|title| Series::from_header_token(title.as_ref()))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::from_columns(columns)
    }

    #[must_use]
    pub fn x(&self) -> &Series {
        &self.x
    }

    #[must_use]
    pub fn ys(&self) -> &[Series] {
        &self.ys
    }

    /// Every column, x first.
    pub fn columns(&self) -> impl Iterator<Item = &Series> {
        std::iter::once(&self.x).chain(self.ys.iter())
    }

    pub(crate) fn columns_mut(&mut self) -> (&mut Series, &mut [Series]) {
        (&mut self.x, &mut self.ys)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        1 + self.ys.len()
    }

    /// Number of rows stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Appends one row, one value per column.
    ///
    /// A row with the wrong number of fields is logged and skipped. A value
    /// that cannot be parsed, or whose kind disagrees with its column, is
    /// logged and returned as an error; no column is changed in that case.
    pub fn add_row<'a, I, V>(&mut self, row: I) -> ChartResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<RawValue<'a>>,
    {
        let line = self.rows_seen + 1;
        self.add_row_at(line, row)
    }

    /// Like [`Self::add_row`], reporting errors against source line `line`.
    pub fn add_row_at<'a, I, V>(&mut self, line: usize, row: I) -> ChartResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<RawValue<'a>>,
    {
        self.rows_seen += 1;
        let raw: SmallVec<[RawValue<'a>; 8]> = row.into_iter().map(Into::into).collect();
        if raw.len() != self.column_count() {
            let error = ChartError::ColumnCountMismatch {
                line,
                found: raw.len(),
                expected: self.column_count(),
            };
            self.errors.record(&error);
            return Ok(());
        }

        let accepted = self
            .columns()
            .zip(raw.iter())
            .map(|(series, value)| series.accept(*value))
            .collect::<ChartResult<SmallVec<[TypedValue; 8]>>>();
        let typed = match accepted {
            Ok(typed) => typed,
            Err(error) => {
                self.errors.record(&error);
                return Err(error);
            }
        };

        let mut typed = typed.into_iter();
        if let Some(value) = typed.next() {
            self.x.push_typed(value);
        }
        for (series, value) in self.ys.iter_mut().zip(typed) {
            series.push_typed(value);
        }
        trace!(line, columns = raw.len(), "row added");
        Ok(())
    }

    /// Adds a caller-computed legend row shown after the series rows.
    pub fn add_legend_row(&mut self, title: impl Into<String>, average: f64, min: f64, max: f64) {
        self.legend_rows.push(LegendRow::new(title, average, min, max));
    }

    #[must_use]
    pub fn legend_rows(&self) -> &[LegendRow] {
        &self.legend_rows
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorLog {
        &mut self.errors
    }

    /// Writes the columns as `;`-separated text with a title header,
    /// every value formatted by the kind of its column.
    pub fn write_delimited<W: io::Write>(&self, writer: W) -> ChartResult<()> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_writer(writer);
        out.write_record(self.columns().map(Series::title))?;
        for index in 0..self.len() {
            out.write_record(
                self.columns()
                    .map(|series| series.format_value(index).unwrap_or_default()),
            )?;
        }
        out.flush()?;
        Ok(())
    }
}
