//! CLI entry point for the EduInsight marks analyzer.
//!
//! Provides subcommands for analyzing a marks spreadsheet into charts and
//! reports, and for inspecting how its columns are classified.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use eduinsight::analyzers::analyzer::analyze_file;
use eduinsight::{
    classify::classify,
    config::AnalysisConfig,
    loader::{ALLOWED_EXTENSIONS, allowed_file, load_dataset},
    output::{print_json, print_pretty, write_augmented_csv, write_json},
    report::write_html,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "eduinsight")]
#[command(about = "Analyze a spreadsheet of student marks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV or Excel marks file and write charts and reports
    Analyze {
        /// Path to a .csv, .xls or .xlsx file
        #[arg(value_name = "FILE")]
        source: String,

        /// Optional: JSON config file with chart_dir and ranking_size
        #[arg(long)]
        config: Option<String>,

        /// Directory to write chart images to (overrides config)
        #[arg(short = 'd', long)]
        chart_dir: Option<PathBuf>,

        /// Number of students in the top and bottom lists (overrides config)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// HTML report to write
        #[arg(long, default_value = "report.html")]
        html: String,

        /// Optional: write the full results as JSON
        #[arg(long)]
        json: Option<String>,

        /// Optional: write the augmented table (with Total, Percentage, Grade) as CSV
        #[arg(long)]
        csv: Option<String>,

        /// Also log the full results as JSON
        #[arg(long)]
        print_json: bool,
    },
    /// Show the role inferred for every column
    Classify {
        /// Path to a .csv, .xls or .xlsx file
        #[arg(value_name = "FILE")]
        source: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/eduinsight.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("eduinsight.log"));

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
        Commands::Analyze {
            source,
            config,
            chart_dir,
            top_n,
            html,
            json,
            csv,
            print_json: log_json,
        } => {
            ensure_allowed(&source)?;

            let config = match config {
                Some(path) => AnalysisConfig::load(&path)
                    .with_context(|| format!("Cannot load config {path}"))?,
                None => AnalysisConfig::default(),
            }
            .with_overrides(chart_dir, top_n);

            let report = analyze_file(&source, &config).with_context(|| {
                format!("Error during analysis of {source}. Please make sure the file has student names and marks")
            })?;
            print_pretty(&report);
            if log_json {
                print_json(&report)?;
            }

            write_html(&html, &report)?;
            if let Some(path) = json {
                write_json(&path, &report)?;
                info!(path = %path, "JSON results written");
            }
            if let Some(path) = csv {
                write_augmented_csv(&path, &report)?;
                info!(path = %path, "Augmented table written");
            }

            for student in &report.rankings.top {
                info!(
                    name = %student.display_name(),
                    total = student.total,
                    percentage = student.percentage,
                    grade = %student.grade,
                    "Top performer"
                );
            }

            info!(
                students = report.summary.total_students,
                subjects = ?report.summary.subjects_found,
                class_average = report.summary.class_average,
                html = %html,
                "Report summary"
            );
        }
        Commands::Classify { source } => {
            ensure_allowed(&source)?;

            let dataset = load_dataset(&source)?;
            let classification = classify(&dataset)?;

            for (column, role) in dataset.columns.iter().zip(&classification.roles) {
                info!(column = %column.name, role = %role, "Column");
            }

            info!(
                rows = dataset.row_count(),
                subjects = classification.subjects.len(),
                fallback = classification.used_fallback,
                "Classification summary"
            );
        }
    }

    Ok(())
}

fn ensure_allowed(source: &str) -> Result<()> {
    if !allowed_file(source) {
        bail!(
            "Invalid file type {source}. Expected one of: {}",
            ALLOWED_EXTENSIONS.join(", ")
        );
    }
    Ok(())
}
