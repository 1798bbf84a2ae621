//! CLI entry point for the composition grade-distribution tool.
//!
//! Provides subcommands for inspecting a grade export and for producing the
//! full grade-distribution report for composition courses.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use comp_grades::analyzers::types::Shape;
use comp_grades::config::AnalysisConfig;
use comp_grades::output::{
    print_json, print_pretty, render_preview, render_text, render_validation, write_distribution,
};
use comp_grades::pipeline::{inspect, run};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "comp_grades")]
#[command(about = "Grade distributions for freshman composition courses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
struct Source {
    /// CSV export of grade records
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// JSON config file; flags given here override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Expected number of data rows
    #[arg(long, requires = "expect_columns")]
    expect_rows: Option<usize>,

    /// Expected number of columns
    #[arg(long, requires = "expect_rows")]
    expect_columns: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a grade export and report its shape, column types, and first rows
    Inspect {
        #[command(flatten)]
        source: Source,

        /// Number of rows to preview
        #[arg(short = 'n', long)]
        rows: Option<usize>,
    },
    /// Compute grade frequencies and percentages for composition courses
    Report {
        #[command(flatten)]
        source: Source,

        /// Column holding the course title
        #[arg(long)]
        course_column: Option<String>,

        /// Column holding the grade to tabulate
        #[arg(long)]
        grade_column: Option<String>,

        /// Course title to include (repeatable; replaces the default list)
        #[arg(long = "course", value_name = "TITLE")]
        courses: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the percentage distribution to this CSV file
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/comp_grades.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("comp_grades.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { source, rows } => {
            let mut config = resolve_config(&source)?;
            if let Some(rows) = rows {
                config.preview_rows = rows;
            }

            let (table, validation) = inspect(&config)?;
            print!("{}", render_preview(&table, config.preview_rows));
            println!();
            print!("{}", render_validation(&validation));
        }
        Commands::Report {
            source,
            course_column,
            grade_column,
            courses,
            format,
            csv_out,
        } => {
            let mut config = resolve_config(&source)?;
            if let Some(column) = course_column {
                config.course_column = column;
            }
            if let Some(column) = grade_column {
                config.grade_column = column;
            }
            if !courses.is_empty() {
                config.allowed_courses = courses;
            }
            config.check()?;

            let report = run(&config)?;
            print_pretty(&report);

            match format {
                Format::Text => print!("{}", render_text(&report)),
                Format::Json => print_json(&report)?,
            }

            if let Some(path) = csv_out {
                write_distribution(&path, &report.by_share)?;
            }
        }
    }

    Ok(())
}

/// Builds the run configuration from the optional config file plus flags.
fn resolve_config(source: &Source) -> Result<AnalysisConfig> {
    let expected = source
        .expect_rows
        .zip(source.expect_columns)
        .map(|(rows, columns)| Shape { rows, columns });

    Ok(AnalysisConfig::resolve(
        source.config.as_deref(),
        source.input.clone(),
        expected,
    )?)
}
