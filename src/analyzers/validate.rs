use tracing::{info, warn};

use crate::analyzers::types::{Shape, ValidationReport};
use crate::table::Table;

/// Describes the table's dimensions and column types, and compares them with
/// `expected` when given. Never fails; a mismatch is only logged.
pub fn validate(table: &Table, expected: Option<Shape>) -> ValidationReport {
    let rows = table.row_count();
    let columns = table.column_count();
    let matches = expected.map(|e| e.rows == rows && e.columns == columns);

    match (expected, matches) {
        (Some(e), Some(false)) => warn!(
            rows,
            columns,
            expected_rows = e.rows,
            expected_columns = e.columns,
            "Table shape does not match expectation"
        ),
        (Some(_), Some(true)) => info!(rows, columns, "Table shape verified"),
        _ => info!(rows, columns, "No expected shape configured"),
    }

    ValidationReport {
        rows,
        columns,
        column_types: table.columns().to_vec(),
        expected,
        matches,
    }
}
