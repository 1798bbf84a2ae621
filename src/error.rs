//! Error taxonomy shared by every pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the loader, filter, and aggregator stages.
///
/// Each variant names the stage and the offending input so the message can be
/// shown to a user as-is.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("loader: input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("loader: malformed CSV in {} (line {line}): {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("{stage}: required column '{column}' is not present")]
    Schema {
        stage: &'static str,
        column: String,
    },

    #[error("aggregator: cannot compute percentages of '{column}' over an empty table")]
    EmptyTable { column: String },

    #[error("config: {0}")]
    Config(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
