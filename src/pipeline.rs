//! End-to-end run: load, validate, filter, aggregate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::analyzers::aggregate::{distinct_values, frequency, percentage_from};
use crate::analyzers::filter::filter_by_values;
use crate::analyzers::types::{
    FrequencyDistribution, PercentageDistribution, SortOrder, ValidationReport,
};
use crate::analyzers::validate::validate;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader::load_table;
use crate::table::Table;

/// Everything a single run produces.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub generated_at: DateTime<Utc>,
    pub input_path: PathBuf,
    pub validation: ValidationReport,
    pub course_column: String,
    pub grade_column: String,
    pub source_rows: usize,
    pub filtered_rows: usize,
    /// Filtered rows as a percentage (0–100) of all source rows.
    pub filtered_share: f64,
    pub distinct_grades: Vec<String>,
    pub frequency: FrequencyDistribution,
    pub by_share: PercentageDistribution,
    pub by_label: PercentageDistribution,
}

/// Loader and validator only.
pub fn inspect(config: &AnalysisConfig) -> Result<(Table, ValidationReport)> {
    let table = load_table(&config.input_path)?;
    let validation = validate(&table, config.expected_shape);
    Ok((table, validation))
}

/// Runs every stage in order. The first failing stage aborts the run.
#[tracing::instrument(skip(config), fields(input = %config.input_path.display()))]
pub fn run(config: &AnalysisConfig) -> Result<GradeReport> {
    let (table, validation) = inspect(config)?;

    let filtered = filter_by_values(&table, &config.course_column, &config.allowed_courses)?;

    let distinct_grades = distinct_values(filtered.table(), &config.grade_column)?;
    let freq = frequency(filtered.table(), &config.grade_column)?;
    let by_share = percentage_from(&freq, SortOrder::ByShareDescending)?;
    let by_label = by_share.sorted(SortOrder::ByLabel);

    info!(
        grades = distinct_grades.len(),
        filtered_rows = filtered.row_count(),
        "Grade distribution computed"
    );

    Ok(GradeReport {
        generated_at: Utc::now(),
        input_path: config.input_path.clone(),
        validation,
        course_column: config.course_column.clone(),
        grade_column: config.grade_column.clone(),
        source_rows: filtered.source_rows(),
        filtered_rows: filtered.row_count(),
        filtered_share: filtered.share_of_source(),
        distinct_grades,
        frequency: freq,
        by_share,
        by_label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use std::env;
    use std::fs;

    #[test]
    fn test_run_over_mixed_courses() {
        let path = env::temp_dir().join("comp_grades_pipeline_mixed.csv");
        fs::write(
            &path,
            "Year,Course Title,Grade\n\
             2018,Freshman Composition I,A\n\
             2018,Biology 101,B\n\
             2019,Freshman Composition II,F\n\
             2019,Freshman Composition I,A\n",
        )
        .unwrap();

        let report = run(&AnalysisConfig::for_input(&path)).unwrap();

        assert_eq!(report.source_rows, 4);
        assert_eq!(report.filtered_rows, 3);
        assert_eq!(report.filtered_share, 75.0);
        assert_eq!(report.distinct_grades, vec!["A", "F"]);
        assert_eq!(report.frequency.get("A"), Some(2));
        assert_eq!(report.by_share.shares()[0].category, "A");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_run_with_no_composition_rows_fails_in_aggregator() {
        let path = env::temp_dir().join("comp_grades_pipeline_none.csv");
        fs::write(&path, "Course Title,Grade\nBiology 101,B\n").unwrap();

        let err = run(&AnalysisConfig::for_input(&path)).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyTable { .. }));

        fs::remove_file(&path).unwrap();
    }
}
