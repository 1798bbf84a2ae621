//! Data types produced by the analysis stages.

use serde::{Deserialize, Serialize};

use crate::analyzers::utility::pct;
use crate::table::{Column, ColumnType, Table};

/// Expected `(rows, columns)` of a loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

/// Advisory result of comparing a table against its expected shape.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub rows: usize,
    pub columns: usize,
    pub column_types: Vec<Column>,
    pub expected: Option<Shape>,
    /// `None` when no expected shape was configured.
    pub matches: Option<bool>,
}

impl ValidationReport {
    /// Names of the columns inferred as integers, in header order.
    pub fn integer_columns(&self) -> Vec<&str> {
        self.column_types
            .iter()
            .filter(|c| c.kind == ColumnType::Integer)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Rows of a source table that passed a filter, with the source size kept
/// for share-of-source reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredTable {
    pub(crate) table: Table,
    pub(crate) source_rows: usize,
}

impl FilteredTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    /// Surviving rows as a percentage (0–100) of the source table's rows.
    pub fn share_of_source(&self) -> f64 {
        pct(self.row_count(), self.source_rows)
    }
}

/// Count of rows per category, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyDistribution {
    pub(crate) column: String,
    pub(crate) counts: Vec<(String, usize)>,
}

impl FrequencyDistribution {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; equals the row count of the table it came from.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(c, n)| (c.as_str(), *n))
    }

    /// Entries sorted ascending by category label.
    pub fn sorted_by_label(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Presentation order for a [`PercentageDistribution`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Largest share first; equal shares keep first-seen order.
    #[default]
    ByShareDescending,
    /// Ascending lexical order of the category label.
    ByLabel,
}

/// One category's share of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Fraction in `[0, 1]`.
    pub fraction: f64,
    #[serde(skip)]
    pub(crate) first_seen: usize,
}

impl CategoryShare {
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Per-category fractions summing to 1.0, stored in the requested order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentageDistribution {
    pub(crate) column: String,
    pub(crate) order: SortOrder,
    pub(crate) shares: Vec<CategoryShare>,
}

impl PercentageDistribution {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn shares(&self) -> &[CategoryShare] {
        &self.shares
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.fraction)
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|s| s.fraction).sum()
    }

    /// Returns the same distribution re-ordered.
    pub fn sorted(&self, order: SortOrder) -> PercentageDistribution {
        let mut shares = self.shares.clone();
        sort_shares(&mut shares, order);
        PercentageDistribution {
            column: self.column.clone(),
            order,
            shares,
        }
    }
}

/// Descending ties fall back to first-seen order, whatever order `shares` is in.
pub(crate) fn sort_shares(shares: &mut [CategoryShare], order: SortOrder) {
    match order {
        SortOrder::ByShareDescending => shares.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        }),
        SortOrder::ByLabel => shares.sort_by(|a, b| a.category.cmp(&b.category)),
    }
}
