//! Analysis configuration.
//!
//! Stored as a JSON object on disk; every field except the input path has a
//! default:
//! ```json
//! {
//!   "input_path": "englS18S20.csv",
//!   "course_column": "Course Title",
//!   "grade_column": "Grade",
//!   "allowed_courses": ["Freshman Composition I", "Freshman Composition II"],
//!   "expected_shape": { "rows": 1947, "columns": 26 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyzers::filter::COMPOSITION_COURSES;
use crate::analyzers::types::Shape;
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub course_column: String,
    pub grade_column: String,
    pub allowed_courses: Vec<String>,
    pub expected_shape: Option<Shape>,
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            course_column: "Course Title".to_string(),
            grade_column: "Grade".to_string(),
            allowed_courses: COMPOSITION_COURSES.iter().map(|s| s.to_string()).collect(),
            expected_shape: None,
            preview_rows: 5,
        }
    }
}

impl AnalysisConfig {
    /// Defaults pointed at `input_path`.
    pub fn for_input(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Default::default()
        }
    }

    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| AnalysisError::Config(format!("{}: {e}", path.display())))?;
        config.check()?;
        Ok(config)
    }

    /// Starts from the config file at `config_path` (or the defaults) and
    /// lets an explicit `input` and `expected` shape override it.
    pub fn resolve(
        config_path: Option<&Path>,
        input: Option<PathBuf>,
        expected: Option<Shape>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                info!(path = %path.display(), "Loading config file");
                Self::load(path)?
            }
            None => Self::default(),
        };

        if let Some(input) = input {
            config.input_path = input;
        }
        if config.input_path.as_os_str().is_empty() {
            return Err(AnalysisError::Config(
                "no input file given (pass INPUT or set input_path in the config file)"
                    .to_string(),
            ));
        }
        if expected.is_some() {
            config.expected_shape = expected;
        }

        Ok(config)
    }

    /// Rejects configurations that cannot produce a meaningful run.
    pub fn check(&self) -> Result<()> {
        if self.course_column.is_empty() || self.grade_column.is_empty() {
            return Err(AnalysisError::Config(
                "column names must not be empty".to_string(),
            ));
        }
        if self.allowed_courses.is_empty() {
            return Err(AnalysisError::Config(
                "allowed_courses must list at least one course title".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_defaults_match_composition_sequence() {
        let config = AnalysisConfig::for_input("grades.csv");
        assert_eq!(config.grade_column, "Grade");
        assert_eq!(config.course_column, "Course Title");
        assert_eq!(config.allowed_courses.len(), 4);
        assert!(
            config
                .allowed_courses
                .contains(&"English Foundations Workshop".to_string())
        );
        assert_eq!(config.expected_shape, None);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let path = env::temp_dir().join("comp_grades_config_partial.json");
        fs::write(
            &path,
            r#"{ "input_path": "engl.csv", "grade_column": "Final Grade",
                 "expected_shape": { "rows": 1947, "columns": 26 } }"#,
        )
        .unwrap();

        let config = AnalysisConfig::load(&path).unwrap();

        assert_eq!(config.input_path, PathBuf::from("engl.csv"));
        assert_eq!(config.grade_column, "Final Grade");
        assert_eq!(config.course_column, "Course Title");
        assert_eq!(
            config.expected_shape,
            Some(Shape {
                rows: 1947,
                columns: 26
            })
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_empty_allow_list() {
        let path = env::temp_dir().join("comp_grades_config_empty_list.json");
        fs::write(&path, r#"{ "allowed_courses": [] }"#).unwrap();

        let err = AnalysisConfig::load(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_invalid_json_is_config_error() {
        let path = env::temp_dir().join("comp_grades_config_bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AnalysisConfig::load(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_flags_override_config_file() {
        let path = env::temp_dir().join("comp_grades_config_resolve.json");
        fs::write(
            &path,
            r#"{ "input_path": "from_file.csv", "grade_column": "Final Grade",
                 "expected_shape": { "rows": 10, "columns": 5 } }"#,
        )
        .unwrap();

        let config = AnalysisConfig::resolve(
            Some(path.as_path()),
            Some(PathBuf::from("from_flag.csv")),
            Some(Shape {
                rows: 1947,
                columns: 26,
            }),
        )
        .unwrap();

        assert_eq!(config.input_path, PathBuf::from("from_flag.csv"));
        assert_eq!(
            config.expected_shape,
            Some(Shape {
                rows: 1947,
                columns: 26
            })
        );
        assert_eq!(config.grade_column, "Final Grade");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_keeps_file_values_without_flags() {
        let path = env::temp_dir().join("comp_grades_config_resolve_file_only.json");
        fs::write(
            &path,
            r#"{ "input_path": "from_file.csv",
                 "expected_shape": { "rows": 10, "columns": 5 } }"#,
        )
        .unwrap();

        let config = AnalysisConfig::resolve(Some(path.as_path()), None, None).unwrap();

        assert_eq!(config.input_path, PathBuf::from("from_file.csv"));
        assert_eq!(
            config.expected_shape,
            Some(Shape {
                rows: 10,
                columns: 5
            })
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_without_input_is_config_error() {
        let err = AnalysisConfig::resolve(None, None, None).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }
}
