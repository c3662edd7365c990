//! Audiotester Verify - replay recorded counters to confirm sample loss
//!
//! Reads the `sent_*.bin` and `recv_*.bin` files written by the audiotester
//! sample recorder and reports gaps per direction, independent of the live
//! loss detector.
//!
//! ```bash
//! verify-loss %APPDATA%\audiotester\recordings
//! verify-loss --json --max-examples 3 ./recordings
//! ```

use anyhow::{Context, Result};
use audiotester_verify::{report, verify_directory, VerifyConfig, VerifyError};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Independent loss verification for audiotester recordings
#[derive(Parser, Debug)]
#[command(name = "verify-loss", version, about)]
struct Cli {
    /// Directory containing sent_*.bin and recv_*.bin recordings
    dir: PathBuf,

    /// Print the summary as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Example gaps listed per file (default 10)
    #[arg(long, value_name = "N")]
    max_examples: Option<usize>,

    /// JSON config file with example limit, prefixes, and extension
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Version line shown by `--version`, including the build date
fn version_line() -> String {
    format!(
        "{} (built {})",
        audiotester_verify::VERSION,
        audiotester_verify::BUILD_DATE
    )
}

fn parse_cli() -> Cli {
    let matches = Cli::command().version(version_line()).get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "audiotester_verify={level},audiotester_verify_core={level}"
    ))
}

/// `-v` forces debug; otherwise `RUST_LOG` wins, falling back to info
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return crate_filter("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| crate_filter("info"))
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(verbose))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    tracing::info!(
        version = audiotester_verify::VERSION,
        build_date = audiotester_verify::BUILD_DATE,
        "Starting loss verification"
    );

    let mut config = match &cli.config {
        Some(path) => VerifyConfig::load(path)?,
        None => VerifyConfig::default(),
    };
    if let Some(n) = cli.max_examples {
        config.max_examples = n;
    }

    let summary = match verify_directory(&cli.dir, &config) {
        Ok(summary) => summary,
        Err(e @ VerifyError::NotADirectory(_)) => return Err(e.into()),
        Err(e) => {
            return Err(e).with_context(|| format!("verifying {}", cli.dir.display()));
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        report::write_json(&mut out, &summary)?;
    } else {
        report::write_text(&mut out, &summary, &config)?;
    }
    out.flush()?;

    Ok(())
}
