//! In-memory table model with per-column type tags.

use serde::Serialize;
use std::fmt;

use crate::error::{AnalysisError, Result};

/// Inferred type of a column, computed once when the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::String => write!(f, "string"),
        }
    }
}

/// A named column and its inferred type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

/// An ordered set of rows sharing one schema.
///
/// Every row holds exactly `columns.len()` fields. Empty strings are treated
/// as missing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from a header and raw rows, inferring column types.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Parse`] if any row's width differs from the
    /// header's. `line` is the 1-based file line, counting the header as line 1.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(AnalysisError::Parse {
                    path: "<memory>".into(),
                    line: i as u64 + 2,
                    message: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        row.len()
                    ),
                });
            }
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                kind: infer_type(rows.iter().map(|r| r[idx].as_str())),
                name,
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Builds a table that reuses an existing schema. Used for row subsets.
    pub(crate) fn with_schema(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of `name` in the header.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Schema`] tagged with `stage` if the column is absent.
    pub fn column_index(&self, name: &str, stage: &'static str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| AnalysisError::Schema {
                stage,
                column: name.to_string(),
            })
    }

    /// Iterates over every value of one column, top to bottom.
    pub fn values(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |r| r[idx].as_str())
    }
}

/// A column is `Integer` when it has at least one value and every non-missing
/// value parses as `i64`.
fn infer_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut seen = false;
    for v in values.filter(|v| !v.is_empty()) {
        seen = true;
        if v.parse::<i64>().is_err() {
            return ColumnType::String;
        }
    }
    if seen {
        ColumnType::Integer
    } else {
        ColumnType::String
    }
}
