//! CLI entry point for the sales analyzer.
//!
//! Provides subcommands for summarizing a sales file into revenue insights
//! and for printing descriptive statistics of its numeric columns.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sales_analyzer::analyzers::{clean, describe};
use sales_analyzer::analyzers::types::CleanedRecord;
use sales_analyzer::{
    config::ColumnConfig,
    fetch::load_source,
    output::{
        print_json, print_pretty, render_describe, render_summary, write_report_json,
        write_summary_csvs,
    },
    parser::parse_sales_csv,
    stats::SalesReport,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sales_analyzer")]
#[command(about = "A tool to summarize sales records into revenue insights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize revenue by product, day and category
    Analyze {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file mapping columns to header names (defaults to $SALES_COLUMNS_CONFIG)
        #[arg(short, long)]
        columns: Option<String>,

        /// Number of cleaned rows to preview
        #[arg(long, default_value_t = 5)]
        head: usize,

        /// Optional: write the full report as JSON to this path
        #[arg(long)]
        json: Option<String>,

        /// Optional: directory to export one CSV per summary into
        #[arg(short, long)]
        export_dir: Option<String>,
    },
    /// Print descriptive statistics for price, quantity and revenue
    Describe {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file mapping columns to header names (defaults to $SALES_COLUMNS_CONFIG)
        #[arg(short, long)]
        columns: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sales_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sales_analyzer.log"));

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
            columns,
            head,
            json,
            export_dir,
        } => {
            let records = load_records(&source, columns.as_deref())?;
            let report = SalesReport::from_records(&records)?.with_source(&source);

            info!(
                total_revenue = report.total_revenue,
                top_product = %report.top_product,
                peak_day = %report.peak_day,
                "Sales insights"
            );
            print_pretty(&report);

            let mut stdout = std::io::stdout().lock();
            render_summary(&mut stdout, &report, &records, head)?;

            if let Some(path) = json {
                write_report_json(&path, &report)?;
                info!(path = %path, "Report written");
            } else {
                print_json(&report)?;
            }

            if let Some(dir) = export_dir {
                write_summary_csvs(&dir, &report)?;
            }
        }
        Commands::Describe { source, columns } => {
            let records = load_records(&source, columns.as_deref())?;
            info!(rows = records.len(), source = %source, "Describing dataset");

            let mut stdout = std::io::stdout().lock();
            render_describe(&mut stdout, &describe(&records))?;
        }
    }

    Ok(())
}

/// Loads, parses and cleans the sales records at `source`.
#[tracing::instrument(skip(columns))]
fn load_records(source: &str, columns: Option<&str>) -> Result<Vec<CleanedRecord>> {
    let config = ColumnConfig::resolve(columns)?;
    let bytes = load_source(source)?;
    let raw = parse_sales_csv(&bytes, &config)?;
    let records = clean(&raw)?;

    info!(rows = records.len(), "Records cleaned");
    Ok(records)
}
