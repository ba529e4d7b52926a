use std::collections::{BTreeMap, BTreeSet};

use super::error::ParseError;
use super::model::{interactive_columns, ParsedTable};
use super::summary::summarize;

/// Name of the iteration column every residual log must carry.
pub const TIME_COLUMN: &str = "Time";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse the text of a residual log into a [`ParsedTable`].
///
/// Expected layout (whitespace-delimited, `#` characters are ignored anywhere):
///
/// ```text
/// # Residuals                         <- first line, always skipped
/// # Time    p         Ux        Uy    <- header, must contain `Time`
///   1       1.0e+00   1.0e+00   N/A
///   2       4.2e-01   3.1e-01   N/A
/// ```
///
/// Only structural problems fail (see [`ParseError`]). Bad cells become `NaN`,
/// short rows are padded with `NaN`, and columns without a single finite value
/// are dropped.
pub fn parse(raw_text: &str) -> Result<ParsedTable, ParseError> {
    let cleaned = raw_text.replace('#', "");
    let rows: Vec<&str> = cleaned
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if rows.len() < 2 {
        return Err(ParseError::MissingRows);
    }

    let raw = RawTable::from_header(rows[0])?;
    let width = raw.header.len();

    let mut time_values = Vec::with_capacity(rows.len() - 1);
    // One accumulator per header position; the `Time` slot stays empty.
    let mut accumulators: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len() - 1); width];

    for (row_index, line) in rows.iter().enumerate().skip(1) {
        let fields = split_columns(line);
        if fields.is_empty() {
            continue;
        }
        if fields.len() > width {
            return Err(ParseError::RowOverflow { row: row_index + 2 });
        }

        for (column_index, values) in accumulators.iter_mut().enumerate() {
            let value = parse_numeric_value(fields.get(column_index).copied().unwrap_or(""));
            if column_index == raw.time_index {
                time_values.push(value);
            } else {
                values.push(value);
            }
        }
    }

    let (columns, data_columns) = raw.finish(accumulators);
    let stats = summarize(&time_values, &data_columns);

    Ok(ParsedTable {
        time_values,
        interactive_columns: interactive_columns(&columns),
        columns,
        data_columns,
        stats,
    })
}

// ---------------------------------------------------------------------------
// RawTable – header state while rows are accumulated
// ---------------------------------------------------------------------------

struct RawTable {
    header: Vec<String>,
    time_index: usize,
}

impl RawTable {
    fn from_header(line: &str) -> Result<Self, ParseError> {
        let header: Vec<String> = split_columns(line).into_iter().map(str::to_string).collect();
        if header.is_empty() {
            return Err(ParseError::UnparsableHeader);
        }

        let time_index = header
            .iter()
            .position(|h| h == TIME_COLUMN)
            .ok_or(ParseError::MissingTimeColumn)?;

        Ok(RawTable { header, time_index })
    }

    /// Keep the candidate columns holding at least one finite value.
    ///
    /// A name repeated in the header is only taken from its first position.
    fn finish(self, accumulators: Vec<Vec<f64>>) -> (Vec<String>, BTreeMap<String, Vec<f64>>) {
        let mut seen = BTreeSet::new();
        let mut columns = Vec::new();
        let mut data_columns = BTreeMap::new();

        for (index, (name, values)) in self.header.into_iter().zip(accumulators).enumerate() {
            if index == self.time_index || !seen.insert(name.clone()) {
                continue;
            }
            if has_finite_value(&values) {
                columns.push(name.clone());
                data_columns.insert(name, values);
            }
        }

        (columns, data_columns)
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn split_columns(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Convert one cell to a number: empty, `N/A`, unparsable and non-finite
/// cells all become `NaN`.
pub fn parse_numeric_value(value: &str) -> f64 {
    if value.is_empty() || value.eq_ignore_ascii_case("N/A") {
        return f64::NAN;
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

fn has_finite_value(values: &[f64]) -> bool {
    values.iter().any(|v| v.is_finite())
}
