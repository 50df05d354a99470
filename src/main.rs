//! CLI entry point for hwdb-check
//!
//! Parses and validates hwdb files, prints one summary line per file
//! and one line per issue, and exits with status 1 if anything was
//! reported.

use clap::{ArgAction, Parser, ValueEnum};
use colored::*;
use hwdb_check::run::{RunReport, ValidationRun};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hwdb-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// hwdb files to check
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Do not print per-file summary lines
    #[arg(short, long)]
    quiet: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum OutputFormat {
    /// One line per file and per issue
    Text,
    /// A single JSON document
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let report = match cli.format {
        OutputFormat::Text => check_text(&cli),
        OutputFormat::Json => check_json(&cli)?,
    };

    tracing::debug!(errors = report.error_count(), "run complete");

    std::process::exit(report.exit_code());
}

/// Logs go to stderr so stdout stays the tool's report
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Check files and print text as each file is processed
fn check_text(cli: &Cli) -> RunReport {
    let mut run = ValidationRun::new();

    for path in &cli.files {
        let file = run.add_file(path);

        if !cli.quiet {
            println!("{}", file.summary);
        }
        if let Some(issue) = &file.error {
            println!("{}", format!("{}", issue).red());
        }
    }

    let report = run.finish();

    for issue in &report.issues {
        println!("{}", format!("{}", issue).red());
    }

    if report.failed() {
        eprintln!(
            "{} {} error{} found",
            "✗".red().bold(),
            report.error_count(),
            if report.error_count() == 1 { "" } else { "s" }
        );
    }

    report
}

/// Check every file, then print one JSON document
fn check_json(cli: &Cli) -> anyhow::Result<RunReport> {
    let mut run = ValidationRun::new();

    for path in &cli.files {
        run.add_file(path);
    }

    let report = run.finish();
    println!("{}", report.to_json()?);

    Ok(report)
}
