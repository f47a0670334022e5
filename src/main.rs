//! filecensus - a directory census tool.
//!
//! Usage:
//!   fcensus PATH                       Analyze a directory
//!   fcensus PATH -t 10KB               Report files larger than 10 KB
//!   fcensus PATH -l                    Follow symlinks during traversal
//!   fcensus PATH -f perms.txt          Unusual-permissions report file
//!   fcensus PATH --report-big-files f  Big-files report file
//!   fcensus --help                     Show help
//!
//! Walks the tree breadth-first, classifies every file by content
//! signature (extension as fallback), and prints one summary line per
//! category. Unusual permission bits and files above the threshold go to
//! their own report sinks.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use filecensus_analyze::{Analyzer, Classifier};
use filecensus_core::{DEFAULT_THRESHOLD, ScanConfig, normalize};
use filecensus_scan::Walker;

/// Exit code for configuration errors (bad path, bad threshold,
/// unopenable report sink).
const EXIT_CONFIG: u8 = 1;
/// Exit code for a run aborted by an unexpected traversal error.
const EXIT_ABORTED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "filecensus",
    version,
    about = "A directory census tool",
    long_about = "filecensus walks a directory tree, classifies each file by \
                  content-sniffed type, accumulates per-category size totals, \
                  flags unusual permission bits, and reports files above a \
                  size threshold."
)]
struct Cli {
    /// Directory to analyze
    path: PathBuf,

    /// Big-file threshold in bytes, KB, MB or GB (e.g. "10 MB", "5KB", "100")
    #[arg(short, long, value_parser = parse_threshold, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u64,

    /// Destination for the big-files report (defaults to stdout)
    #[arg(long)]
    report_big_files: Option<PathBuf>,

    /// Destination for the unusual-permissions report
    /// (defaults to <dir>_report.txt)
    #[arg(short = 'f', long)]
    report_file: Option<PathBuf>,

    /// Follow symlinks during directory traversal
    #[arg(short = 'l', long)]
    follow_links: bool,

    /// Summary output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("Unexpected error occurred: {err}.\nAborting.");
        return ExitCode::from(EXIT_ABORTED);
    }

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> ExitCode {
    if !cli.path.exists() {
        eprintln!("Error: {}: doesn't exist.\nAborting.", cli.path.display());
        return ExitCode::from(EXIT_CONFIG);
    }
    let root = normalize(&cli.path, None);
    if !root.is_dir() {
        eprintln!("Error: {}: is not a directory.\nAborting.", cli.path.display());
        return ExitCode::from(EXIT_CONFIG);
    }

    let config = match ScanConfig::builder()
        .root(root)
        .follow_links(cli.follow_links)
        .threshold(cli.threshold)
        .big_files_report(cli.report_big_files)
        .permissions_report(cli.report_file)
        .build()
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}.\nAborting.");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    // Sink acquisition is the only analyzer failure that reaches here;
    // anything after this point is recovered per entry or per directory.
    let mut analyzer = match Analyzer::new(&config, Classifier::new()) {
        Ok(analyzer) => analyzer,
        Err(err) => {
            eprintln!("Error: {err}.\nAborting.");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let mut walker = Walker::from_config(&config);
    let exit = match walker.run(&config.root, &mut analyzer) {
        Ok(()) => emit_summary(&analyzer, cli.format),
        Err(err) => {
            eprintln!("Unexpected error occurred: {err}.\nAborting.");
            ExitCode::from(EXIT_ABORTED)
        }
    };

    if let Err(err) = analyzer.close() {
        eprintln!("Unexpected error occurred: {err}.\nAborting.");
        return ExitCode::from(EXIT_ABORTED);
    }
    exit
}

/// Emit the end-of-run summary to standard output.
fn emit_summary(analyzer: &Analyzer, format: OutputFormat) -> ExitCode {
    let result = match format {
        OutputFormat::Text => analyzer.print_summary(),
        OutputFormat::Json => match serde_json::to_string_pretty(analyzer.totals()) {
            Ok(json) => {
                println!("{json}");
                Ok(())
            }
            Err(err) => Err(err.into()),
        },
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Unexpected error occurred: {err}.\nAborting.");
            ExitCode::from(EXIT_ABORTED)
        }
    }
}

/// Parse a threshold argument: a positive integer with an optional
/// case-insensitive B/KB/MB/GB suffix, whitespace allowed before the
/// suffix. Each unit step multiplies by 1024.
fn parse_threshold(value: &str) -> Result<u64, String> {
    let trimmed = value.trim();
    if let Some(rest) = trimmed.strip_prefix('-') {
        if rest.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Err(format!(
                "invalid threshold value {value}: should be a positive number"
            ));
        }
    }

    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(digits_end);
    if digits.is_empty() {
        return Err(format!("threshold can't be set to [{value}]"));
    }
    let number: u64 = digits
        .parse()
        .map_err(|_| format!("threshold can't be set to [{value}]"))?;
    if number == 0 {
        return Err(format!(
            "invalid threshold value {value}: should be a positive number"
        ));
    }

    let multiplier = match suffix.trim().to_uppercase().as_str() {
        "" | "B" => 1,
        "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        unit => {
            return Err(format!(
                "invalid unit {unit} is provided for the threshold; valid units are B, KB, MB, GB"
            ));
        }
    };
    number
        .checked_mul(multiplier)
        .ok_or_else(|| format!("threshold {value} is out of range"))
}
