//! # qgate CLI entry point
//!
//! Parses arguments, installs the log subscriber, and hands off to
//! [`run_validate`].

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qgate_cli::validate::{run_validate, ValidateArgs};

/// Structural and quality validation for JSON and YAML documents.
///
/// Each document is matched to a schema (by marker keys, or with --schema),
/// checked structurally, and given a 0-100 quality score.
#[derive(Parser, Debug)]
#[command(name = "qgate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress everything but errors on stderr.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --quiet overrides RUST_LOG; RUST_LOG overrides -v.
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else {
        let level = match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("qgate v{} starting", env!("CARGO_PKG_VERSION"));

    match run_validate(&cli.validate) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
