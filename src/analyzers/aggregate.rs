use std::collections::HashMap;

use tracing::debug;

use crate::analyzers::types::{
    CategoryShare, FrequencyDistribution, PercentageDistribution, SortOrder, sort_shares,
};
use crate::error::{AnalysisError, Result};
use crate::table::Table;

/// Distinct values of `column`, in the order they are first encountered.
pub fn distinct_values(table: &Table, column: &str) -> Result<Vec<String>> {
    let freq = frequency(table, column)?;
    Ok(freq.counts.into_iter().map(|(c, _)| c).collect())
}

/// Counts rows per distinct value of `column`.
///
/// Missing (empty) values are counted as their own category so the counts
/// always sum to the table's row count.
pub fn frequency(table: &Table, column: &str) -> Result<FrequencyDistribution> {
    let idx = table.column_index(column, "aggregator")?;

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in table.values(idx) {
        match positions.get(value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    debug!(column, categories = counts.len(), "Frequencies counted");
    Ok(FrequencyDistribution {
        column: column.to_string(),
        counts,
    })
}

/// Normalizes the frequencies of `column` to fractions of the row count.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyTable`] if `table` has no rows, and
/// [`AnalysisError::Schema`] if `column` is absent.
pub fn percentage(table: &Table, column: &str, order: SortOrder) -> Result<PercentageDistribution> {
    let freq = frequency(table, column)?;
    percentage_from(&freq, order)
}

/// Same as [`percentage`] but reuses an already computed frequency table.
pub fn percentage_from(
    freq: &FrequencyDistribution,
    order: SortOrder,
) -> Result<PercentageDistribution> {
    if freq.is_empty() {
        return Err(AnalysisError::EmptyTable {
            column: freq.column.clone(),
        });
    }

    let total = freq.total();
    let mut shares: Vec<CategoryShare> = freq
        .iter()
        .enumerate()
        .map(|(first_seen, (category, count))| CategoryShare {
            category: category.to_string(),
            count,
            fraction: count as f64 / total as f64,
            first_seen,
        })
        .collect();
    sort_shares(&mut shares, order);

    Ok(PercentageDistribution {
        column: freq.column.clone(),
        order,
        shares,
    })
}
