/// Structural defects that prevent a residual log from being parsed.
///
/// Anything else wrong with a file (non-numeric cells, short rows, `N/A`)
/// is not an error and shows up as `NaN` in the parsed table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Fewer than one header row and one data row after the first line.
    #[error("Expected at least one header row and one data row.")]
    MissingRows,

    /// The header row produced no tokens.
    #[error("Could not parse header row.")]
    UnparsableHeader,

    /// No header token is exactly `Time`.
    #[error("Expected a \"Time\" column in the file.")]
    MissingTimeColumn,

    /// A data row has more fields than the header; `row` is the
    /// 1-based row number shown to the user.
    #[error("Row {row} has more values than header columns.")]
    RowOverflow { row: usize },
}
