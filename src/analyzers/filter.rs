use tracing::info;

use crate::analyzers::types::FilteredTable;
use crate::error::Result;
use crate::table::Table;

/// Course titles that make up the freshman composition sequence.
pub static COMPOSITION_COURSES: &[&str] = &[
    "Freshman Composition I",
    "Freshman Composition II",
    "Freshman Composition I Lab",
    "English Foundations Workshop",
];

/// Keeps the rows whose `column` value exactly matches one of `allowed`.
///
/// Row order is preserved and the source schema is reused as-is. Matching
/// nothing is not an error; the result is simply empty.
#[tracing::instrument(skip(table, allowed), fields(source_rows = table.row_count()))]
pub fn filter_by_values<S: AsRef<str>>(
    table: &Table,
    column: &str,
    allowed: &[S],
) -> Result<FilteredTable> {
    let idx = table.column_index(column, "filter")?;

    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .filter(|row| allowed.iter().any(|a| a.as_ref() == row[idx]))
        .cloned()
        .collect();

    let filtered = FilteredTable {
        table: Table::with_schema(table.columns().to_vec(), rows),
        source_rows: table.row_count(),
    };

    info!(
        kept = filtered.row_count(),
        share = filtered.share_of_source(),
        "Rows filtered"
    );
    Ok(filtered)
}
