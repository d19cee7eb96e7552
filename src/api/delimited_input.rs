use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::api::Chart;
use crate::core::Series;
use crate::core::value::is_bare_number;
use crate::error::{ChartError, ChartResult};

/// Picks the field delimiter from the first line of a file.
///
/// Tab wins when it occurs at least as often as comma and semicolon.
/// Semicolon wins when it is the most frequent of the remaining two, or
/// when it occurs exactly one time less than comma (a decimal comma in
/// one field). Comma otherwise.
#[must_use]
pub fn detect_delimiter(first_line: &str) -> u8 {
    let count = |needle: char| first_line.chars().filter(|c| *c == needle).count();
    let (tabs, commas, semicolons) = (count('\t'), count(','), count(';'));
    if tabs >= commas && tabs >= semicolons {
        b'\t'
    } else if (semicolons >= commas && semicolons >= tabs)
        || (semicolons > 0 && semicolons + 1 == commas)
    {
        b';'
    } else {
        b','
    }
}

/// Reads a chart from delimited text.
///
/// The first line holds the column titles (see [`Series::from_header_token`]).
/// When every field of that line is a bare number it is data instead: the
/// columns are named `col1..colN` and the line becomes the first row.
pub fn read_chart_str(input: &str) -> ChartResult<Chart> {
    let Some(first_line) = input.lines().find(|line| !line.trim().is_empty()) else {
        return Err(ChartError::InvalidData(
            "delimited input has no header line".to_owned(),
        ));
    };
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());
    let mut records = reader.records();

    let Some(header) = records.next().transpose()? else {
        return Err(ChartError::InvalidData(
            "delimited input has no header line".to_owned(),
        ));
    };
    let header_is_data = header.iter().all(is_bare_number);
    let mut chart = if header_is_data {
        let columns = (1..=header.len())
            .map(|index| Series::new(format!("col{index}")))
            .collect();
        let mut chart = Chart::from_columns(columns)?;
        chart.add_row_at(line_of(&header, 1), header.iter())?;
        chart
    } else {
        Chart::from_titles(header.iter())?
    };

    for (offset, record) in records.enumerate() {
        let record = record?;
        chart.add_row_at(line_of(&record, offset + 2), record.iter())?;
    }

    debug!(
        delimiter = %char::from(delimiter).escape_default(),
        columns = chart.column_count(),
        rows = chart.len(),
        header_is_data,
        skipped = chart.errors().len(),
        "delimited input read"
    );
    Ok(chart)
}

pub fn read_chart<R: Read>(mut reader: R) -> ChartResult<Chart> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    read_chart_str(&input)
}

pub fn read_chart_file(path: impl AsRef<Path>) -> ChartResult<Chart> {
    let input = fs::read_to_string(path)?;
    read_chart_str(&input)
}

fn line_of(record: &csv::StringRecord, fallback: usize) -> usize {
    record
        .position()
        .map_or(fallback, |position| position.line() as usize)
}
