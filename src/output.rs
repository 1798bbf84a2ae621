//! Output formatting and persistence for grade reports.
//!
//! Supports a plain-text report, JSON serialization, a table preview, and a
//! CSV export of the percentage distribution.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use csv::WriterBuilder;

use crate::analyzers::types::{PercentageDistribution, SortOrder, ValidationReport};
use crate::pipeline::GradeReport;
use crate::table::Table;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &GradeReport) {
    debug!("{:#?}", report);
}

/// Prints a report to stdout as pretty-printed JSON.
pub fn print_json(report: &GradeReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[derive(Serialize)]
struct DistributionRow<'a> {
    grade: &'a str,
    count: usize,
    fraction: f64,
    percent: f64,
}

/// Writes a percentage distribution to a CSV file, replacing any existing file.
pub fn write_distribution(path: &Path, dist: &PercentageDistribution) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    for share in dist.shares() {
        writer.serialize(DistributionRow {
            grade: &share.category,
            count: share.count,
            fraction: share.fraction,
            percent: share.percent(),
        })?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = dist.shares().len(), "Distribution written");
    Ok(())
}

fn label(category: &str) -> &str {
    if category.is_empty() {
        "(blank)"
    } else {
        category
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.rows, self.columns)?;
        if let (Some(expected), Some(matches)) = (self.expected, self.matches) {
            let verdict = if matches { "matches" } else { "DOES NOT match" };
            writeln!(
                f,
                "Expected ({}, {}): {verdict}",
                expected.rows, expected.columns
            )?;
        }
        let width = self
            .column_types
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);
        for column in &self.column_types {
            writeln!(f, "  {:<width$}  {}", column.name, column.kind)?;
        }
        Ok(())
    }
}

impl fmt::Display for PercentageDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order() {
            SortOrder::ByShareDescending => {
                writeln!(f, "Percentage of {}, most common first:", self.column())?
            }
            SortOrder::ByLabel => writeln!(f, "Percentage by {}:", self.column())?,
        }
        for share in self.shares() {
            writeln!(
                f,
                "  {:<8} {:>8.4} ({:>6.2}%)",
                label(&share.category),
                share.fraction,
                share.percent()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input: {}", self.input_path.display())?;
        writeln!(f, "{}", self.validation)?;

        writeln!(
            f,
            "Filtered rows: {} of {} ({:.2}% of all rows)\n",
            self.filtered_rows, self.source_rows, self.filtered_share
        )?;

        let grades: Vec<&str> = self.distinct_grades.iter().map(|g| label(g)).collect();
        writeln!(f, "Distinct {}: [{}]\n", self.grade_column, grades.join(", "))?;

        writeln!(f, "Frequency by {}:", self.frequency.column())?;
        for (grade, count) in self.frequency.sorted_by_label() {
            writeln!(f, "  {:<8} {:>6}", label(grade), count)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.by_share)?;
        write!(f, "{}", self.by_label)
    }
}

/// Header plus the first rows of a table, comma separated.
struct Preview<'a> {
    table: &'a Table,
    rows: usize,
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<&str> = self.table.columns().iter().map(|c| c.name.as_str()).collect();
        writeln!(f, "{}", header.join(", "))?;
        for row in self.table.rows().iter().take(self.rows) {
            writeln!(f, "{}", row.join(", "))?;
        }
        Ok(())
    }
}

/// Dimensions and per-column types of a loaded table.
pub fn render_validation(validation: &ValidationReport) -> String {
    validation.to_string()
}

/// The first `n` rows of a table, header included.
pub fn render_preview(table: &Table, n: usize) -> String {
    Preview { table, rows: n }.to_string()
}

/// Human-readable rendering of a full run.
pub fn render_text(report: &GradeReport) -> String {
    report.to_string()
}
