//! CLI argument definitions for the SFLF normalizer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sflf",
    version,
    about = "Normalize FOIA request logs into the Standard FOIA Log Format",
    long_about = "Normalize agency FOIA request logs into the Standard FOIA Log Format (SFLF).\n\n\
                  Reads CSV and spreadsheet exports, recovers misplaced headers, maps column\n\
                  names and status values onto the SFLF vocabulary and writes clean CSV files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./sflf.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize one or more FOIA logs.
    Normalize(NormalizeArgs),

    /// Show how a log would be mapped, without writing anything.
    Preview(PreviewArgs),

    /// List the canonical SFLF columns and statuses.
    Vocabulary,

    /// Show how many synonyms are loaded for each canonical name.
    Synonyms,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Log files to normalize (CSV or spreadsheet).
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Input format (default: inferred from each file's extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Output directory (default: [output] dir from the config, else ./outputs).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Where the log came from, stamped on every row.
    #[arg(long = "source")]
    pub source: Option<String>,

    /// Agency that produced the log, stamped on every row.
    #[arg(long = "agency")]
    pub agency: Option<String>,

    /// First day covered by the log (YYYY-MM-DD).
    #[arg(long = "period-start", value_name = "DATE")]
    pub period_start: Option<NaiveDate>,

    /// Last day covered by the log (YYYY-MM-DD).
    #[arg(long = "period-end", value_name = "DATE")]
    pub period_end: Option<NaiveDate>,

    /// Force a column mapping, e.g. --map-column "Req No=request id".
    #[arg(long = "map-column", value_name = "ORIGINAL=CANONICAL", value_parser = parse_assignment)]
    pub map_column: Vec<(String, String)>,

    /// Column that holds request statuses.
    #[arg(long = "status-column", value_name = "LABEL")]
    pub status_column: Option<String>,

    /// Force a status mapping, e.g. --map-status "Closed - Granted=done".
    #[arg(long = "map-status", value_name = "ORIGINAL=CANONICAL", value_parser = parse_assignment)]
    pub map_status: Vec<(String, String)>,

    /// Ask a language model before falling back to fuzzy matching.
    #[arg(long = "remote")]
    pub remote: bool,

    /// Run the pipeline and report without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Log file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input format (default: inferred from the extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Number of sample rows to show.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,

    /// Print the preview as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Ask a language model before falling back to fuzzy matching.
    #[arg(long = "remote")]
    pub remote: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Spreadsheet,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_assignment(value: &str) -> Result<(String, String), String> {
    let (original, canonical) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ORIGINAL=CANONICAL, got '{value}'"))?;
    let original = original.trim();
    if original.is_empty() {
        return Err(format!("missing original name in '{value}'"));
    }
    Ok((original.to_string(), canonical.trim().to_lowercase()))
}
