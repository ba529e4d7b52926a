use std::collections::BTreeMap;

use serde::Serialize;

use super::error::ParseError;

/// Columns preferred by the interactive chart, in display order.
pub const FEATURE_COLUMNS: [&str; 6] = ["Ux", "Uy", "Uz", "p", "epsilon", "k"];

// ---------------------------------------------------------------------------
// DerivedStats – axis bounds derived from a parsed table
// ---------------------------------------------------------------------------

/// Scalar statistics used to size the chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    /// Largest power of ten not above the smallest positive residual.
    pub min_residual: f64,
    /// Largest finite time value, or `1.0` if there is none above zero.
    pub max_iteration: f64,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            min_residual: 1.0,
            max_iteration: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ParsedTable – one residual log after parsing
// ---------------------------------------------------------------------------

/// A parsed residual log: a time vector plus named numeric columns.
///
/// Every vector in `data_columns` has `time_values.len()` entries, with
/// `NaN` marking cells that were missing or not numeric. `data_columns`
/// holds exactly the names listed in `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    pub time_values: Vec<f64>,
    /// Column names in header order (excludes `Time`).
    pub columns: Vec<String>,
    pub data_columns: BTreeMap<String, Vec<f64>>,
    /// `columns` restricted to [`FEATURE_COLUMNS`].
    #[serde(rename = "altairColumns")]
    pub interactive_columns: Vec<String>,
    #[serde(flatten)]
    pub stats: DerivedStats,
}

impl ParsedTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.time_values.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.time_values.is_empty()
    }

    /// Values of a single column, if it survived parsing.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.data_columns.get(name).map(Vec::as_slice)
    }

    /// Columns drawn by the interactive chart: the preferred features when any
    /// are present, all columns otherwise.
    pub fn chart_columns(&self) -> &[String] {
        if self.interactive_columns.is_empty() {
            &self.columns
        } else {
            &self.interactive_columns
        }
    }
}

/// Filter `columns` down to [`FEATURE_COLUMNS`], keeping the allowlist order.
pub fn interactive_columns(columns: &[String]) -> Vec<String> {
    FEATURE_COLUMNS
        .iter()
        .filter(|feature| columns.iter().any(|c| c == *feature))
        .map(|feature| feature.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// FileResult – outcome of one uploaded file
// ---------------------------------------------------------------------------

/// Result of loading one file: either a table or the message to show instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileResult {
    Ok {
        name: String,
        #[serde(flatten)]
        table: ParsedTable,
    },
    Error {
        name: String,
        message: String,
    },
}

impl FileResult {
    pub fn parsed(name: impl Into<String>, table: ParsedTable) -> Self {
        FileResult::Ok {
            name: name.into(),
            table,
        }
    }

    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        FileResult::Error {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wrap a raw parse outcome.
    pub fn from_outcome(name: impl Into<String>, outcome: Result<ParsedTable, ParseError>) -> Self {
        match outcome {
            Ok(table) => Self::parsed(name, table),
            Err(e) => Self::failed(name, e.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FileResult::Ok { name, .. } | FileResult::Error { name, .. } => name,
        }
    }

    pub fn table(&self) -> Option<&ParsedTable> {
        match self {
            FileResult::Ok { table, .. } => Some(table),
            FileResult::Error { .. } => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, FileResult::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(columns: &[&str]) -> ParsedTable {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        ParsedTable {
            time_values: vec![1.0],
            data_columns: columns.iter().map(|c| (c.clone(), vec![0.5])).collect(),
            interactive_columns: interactive_columns(&columns),
            columns,
            stats: DerivedStats::default(),
        }
    }

    #[test]
    fn test_interactive_columns_follow_allowlist_order() {
        let columns: Vec<String> = ["k", "p", "T", "Ux"].iter().map(|c| c.to_string()).collect();
        assert_eq!(interactive_columns(&columns), vec!["Ux", "p", "k"]);
    }

    #[test]
    fn test_chart_columns_fall_back_to_all_columns() {
        let table = table_with(&["T", "alpha"]);
        assert!(table.interactive_columns.is_empty());
        assert_eq!(table.chart_columns(), &["T".to_string(), "alpha".to_string()]);

        let table = table_with(&["T", "p"]);
        assert_eq!(table.chart_columns(), &["p".to_string()]);
    }

    #[test]
    fn test_ok_result_serializes_flat_with_null_for_nan() {
        let mut table = table_with(&["p"]);
        table.time_values = vec![1.0, f64::NAN];
        table.data_columns.insert("p".to_string(), vec![0.5, f64::NAN]);
        let result = FileResult::parsed("residuals.dat", table);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["name"], "residuals.dat");
        assert_eq!(json["timeValues"], serde_json::json!([1.0, null]));
        assert_eq!(json["dataColumns"]["p"], serde_json::json!([0.5, null]));
        assert_eq!(json["altairColumns"], serde_json::json!(["p"]));
        assert_eq!(json["minResidual"], 1.0);
        assert_eq!(json["maxIteration"], 1.0);
    }

    #[test]
    fn test_error_result_carries_parse_message() {
        let result = FileResult::from_outcome("bad.dat", Err(ParseError::MissingTimeColumn));
        assert!(!result.is_ok());
        assert!(result.table().is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Expected a \"Time\" column in the file.");
    }
}
