//! dockerlint CLI tool.
//!
//! Usage:
//! ```bash
//! dockerlint check [OPTIONS] [PATH]
//! dockerlint list-rules
//! dockerlint init
//! ```
//!
//! Exit codes: 0 = pass (warnings/info only, non-strict), 1 = errors
//! found (or warnings in strict mode), 2 = parse or operational failure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod discover;

/// Exit code for operational failures (bad input, parse errors).
const EXIT_FAILURE: u8 = 2;

/// Dockerfile best-practices linter
#[derive(Parser)]
#[command(name = "dockerlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks against a Dockerfile, a directory, or stdin (`-`)
    Check {
        /// Dockerfile or directory to analyze (`-` reads stdin)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,

        /// Exclude patterns for directory discovery (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize a configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output, grouped by severity.
    #[default]
    Text,
    /// JSON output for CI consumption.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            strict,
            exclude,
        } => commands::check::run(&path, format, rules, strict, exclude, cli.config.as_deref()),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("dockerlint: {error:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
