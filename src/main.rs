//! Command line front end for browsing CLDR data and coverage.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
    ValueEnum,
};
use cldr_viewer::CldrViewer;
use cldr_viewer::cldr::Category;
use cldr_viewer::config::{
    ConfigError,
    ConfigManager,
};
use cldr_viewer::coverage::{
    CoverageLevel,
    CoverageReport,
    CoverageSummary,
    RowStatus,
};
use cldr_viewer::error::{
    CldrError,
    TransportError,
};
use serde::Serialize;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "CLDR_VIEWER_LOG";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "cldr-viewer", version, about = "Browse CLDR locale data and translation coverage")]
struct Cli {
    /// Settings file (default: <config dir>/cldr-viewer/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Operation to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// List locales published by the data source
    Locales,
    /// Show the flattened data of one category
    Show {
        locale: String,
        #[arg(value_parser = parse_category)]
        category: Category,
        /// Only keys or values containing this text (case-insensitive)
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Compare one category against the reference locale
    Compare {
        locale: String,
        #[arg(value_parser = parse_category)]
        category: Category,
        /// Reference locale (default: referenceLocale setting)
        #[arg(long)]
        reference: Option<String>,
        #[arg(long, default_value = "")]
        filter: String,
        /// Only rows missing from the locale
        #[arg(long)]
        missing_only: bool,
    },
    /// Translation coverage of every category
    Coverage {
        locale: String,
        #[arg(long)]
        reference: Option<String>,
        /// List the missing keys of each category
        #[arg(long)]
        keys: bool,
    },
    /// Delete every cached document
    ClearCache,
}

/// Output format of every command
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human readable
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Failures that end the program
#[derive(Error, Debug)]
enum CliError {
    /// Settings could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    Transport(#[from] TransportError),

    /// Category is not registered
    #[error(transparent)]
    Cldr(#[from] CldrError),

    /// Log file could not be opened
    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },

    /// Writing to stdout failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// JSON output could not be produced
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Parse a category id given on the command line.
fn parse_category(value: &str) -> Result<Category, CldrError> {
    value.parse()
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("cldr-viewer: {error}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            eprintln!("cldr-viewer: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Install the global subscriber. The returned guard flushes the log file on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, CliError> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("cldr_viewer={level}")));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CliError::LogFile { path: path.to_path_buf(), source })?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        builder.with_writer(writer).with_ansi(false).init();
        Ok(Some(guard))
    } else {
        builder.with_writer(io::stderr).init();
        Ok(None)
    }
}

/// Execute the chosen command.
async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ConfigManager::new();
    config.load_settings(cli.config.as_deref())?;
    let settings = config.get_settings();
    let viewer = CldrViewer::from_settings(settings)?;
    let format = cli.format;
    let mut out = io::stdout();

    match cli.command {
        Command::Locales => {
            let locales = viewer.get_available_locales().await;
            if format == OutputFormat::Json {
                write_json(&mut out, &locales)?;
            } else {
                for locale in &locales {
                    writeln!(out, "{locale}")?;
                }
            }
        }
        Command::Show { locale, category, filter } => {
            let filter = filter.to_lowercase();
            let data: BTreeMap<String, String> = viewer
                .get_flat_category(&locale, category)
                .await?
                .into_iter()
                .filter(|(key, value)| {
                    key.to_lowercase().contains(&filter) || value.to_lowercase().contains(&filter)
                })
                .collect();
            if format == OutputFormat::Json {
                write_json(&mut out, &data)?;
            } else {
                for (key, value) in &data {
                    writeln!(out, "{key}\t{value}")?;
                }
            }
        }
        Command::Compare { locale, category, reference, filter, missing_only } => {
            let reference = reference.unwrap_or_else(|| settings.reference_locale.clone());
            let rows: Vec<_> = viewer
                .compare_category(&locale, &reference, category)
                .await?
                .into_iter()
                .filter(|row| row.matches(&filter) && (!missing_only || row.is_missing()))
                .collect();
            if format == OutputFormat::Json {
                write_json(&mut out, &rows)?;
            } else {
                for row in &rows {
                    writeln!(
                        out,
                        "{:<10}\t{}\t{}\t{}",
                        status_label(row.status),
                        row.key,
                        row.value,
                        row.reference
                    )?;
                }
            }
        }
        Command::Coverage { locale, reference, keys } => {
            let reference = reference.unwrap_or_else(|| settings.reference_locale.clone());
            let report = viewer.compute_coverage(&locale, &reference).await;
            if format == OutputFormat::Json {
                write_json(
                    &mut out,
                    &CoverageOutput {
                        locale: &locale,
                        reference: &reference,
                        categories: &report,
                        summary: report.summary(),
                    },
                )?;
            } else {
                write_coverage_text(&mut out, &locale, &reference, &report, keys)?;
            }
        }
        Command::ClearCache => {
            let removed = viewer.clear_cache().await;
            if format == OutputFormat::Json {
                write_json(&mut out, &serde_json::json!({ "removed": removed }))?;
            } else {
                writeln!(out, "Removed {removed} cached documents")?;
            }
        }
    }

    Ok(())
}

/// JSON shape of the `coverage` command.
#[derive(Serialize)]
struct CoverageOutput<'a> {
    locale: &'a str,
    reference: &'a str,
    categories: &'a CoverageReport,
    summary: CoverageSummary,
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<W: Write, S: Serialize + ?Sized>(out: &mut W, value: &S) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Coverage table, one line per category, then the total.
fn write_coverage_text<W: Write>(
    out: &mut W,
    locale: &str,
    reference: &str,
    report: &CoverageReport,
    keys: bool,
) -> io::Result<()> {
    writeln!(out, "Coverage of {locale} against {reference}")?;
    for entry in report {
        let record = &entry.record;
        writeln!(
            out,
            "  {:<18} {:>6}/{:<6} {:>5.1}%  {}",
            entry.category.label(),
            record.present,
            record.total,
            record.percent,
            level_label(record.level())
        )?;
        if keys {
            for key in &record.missing_keys {
                writeln!(out, "      - {key}")?;
            }
        }
    }

    let summary = report.summary();
    writeln!(
        out,
        "  {:<18} {:>6}/{:<6} {:>5.1}%",
        "Total", summary.present, summary.total, summary.percent
    )?;

    let low = report.low_coverage();
    if !low.is_empty() {
        let names: Vec<_> = low.iter().map(|category| category.label()).collect();
        writeln!(out, "Low coverage: {}", names.join(", "))?;
    }
    Ok(())
}

/// Short label of a row status.
const fn status_label(status: RowStatus) -> &'static str {
    match status {
        RowStatus::Missing => "missing",
        RowStatus::SameAsReference => "same",
        RowStatus::Translated => "translated",
    }
}

/// Short label of a coverage level.
const fn level_label(level: CoverageLevel) -> &'static str {
    match level {
        CoverageLevel::Complete => "complete",
        CoverageLevel::Good => "good",
        CoverageLevel::Partial => "partial",
        CoverageLevel::Low => "low",
        CoverageLevel::None => "none",
    }
}
