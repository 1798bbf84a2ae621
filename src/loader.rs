//! CSV loader for grade-record exports.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::table::Table;

/// Reads a comma-separated file with a header row into a [`Table`].
///
/// # Errors
///
/// * [`AnalysisError::FileNotFound`] if `path` does not exist.
/// * [`AnalysisError::Parse`] if the header is missing, a row's field count
///   differs from the header's, or a field is not valid UTF-8.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalysisError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| csv_to_analysis(path, e))?
        .iter()
        .map(String::from)
        .collect();

    if headers.is_empty() {
        return Err(AnalysisError::Parse {
            path: path.to_path_buf(),
            line: 1,
            message: "missing header row".to_string(),
        });
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| csv_to_analysis(path, e))?;
        rows.push(record.iter().map(String::from).collect::<Vec<_>>());
    }
    debug!(columns = headers.len(), rows = rows.len(), "CSV read");

    let table = Table::new(headers, rows).map_err(|e| match e {
        AnalysisError::Parse { line, message, .. } => AnalysisError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        },
        other => other,
    })?;

    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "Table loaded"
    );
    Ok(table)
}

fn csv_to_analysis(path: &Path, err: csv::Error) -> AnalysisError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => AnalysisError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_counts_non_header_lines() {
        let path = write_temp(
            "comp_grades_loader_rows.csv",
            "Student ID,Course Title,Grade\n1,Freshman Composition I,A\n2,Biology 101,B\n",
        );

        let table = load_table(&path).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.columns()[0].kind, ColumnType::Integer);
        assert_eq!(table.columns()[2].kind, ColumnType::String);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_quoted_fields_with_commas() {
        let path = write_temp(
            "comp_grades_loader_quoted.csv",
            "Course Title,Grade\n\"Writing, Advanced\",A\n",
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.rows()[0][0], "Writing, Advanced");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_header_only_file_loads_empty_table() {
        let path = write_temp("comp_grades_loader_header.csv", "Course Title,Grade\n");

        let table = load_table(&path).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let path = env::temp_dir().join("comp_grades_definitely_missing.csv");
        let _ = fs::remove_file(&path);

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotFound { .. }));
    }

    #[test]
    fn test_inconsistent_field_count_is_parse_error() {
        let path = write_temp(
            "comp_grades_loader_ragged.csv",
            "Course Title,Grade\nFreshman Composition I,A\nFreshman Composition II\n",
        );

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        let path = write_temp("comp_grades_loader_empty.csv", "");

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 1, .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let path = env::temp_dir().join("comp_grades_loader_bad_utf8.csv");
        fs::write(&path, b"Course Title,Grade\nFreshman Composition I,\xff\xfe\n").unwrap();

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 2, .. }));

        fs::remove_file(&path).unwrap();
    }
}
