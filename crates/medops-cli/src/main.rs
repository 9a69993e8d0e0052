//! medops - hospital operations analytics from the command line
//!
//! Reads a JSON request (file, stdin, or nothing), runs one engine, and
//! writes the JSON report to stdout:
//! - `optimize`: bed, staff, and equipment reallocation
//! - `detect`: anomalies against the baseline's normal ranges
//! - `predict`: disease outbreak risk
//! - `train`: retrain the baseline and persist it
//! - `baseline`: print the snapshot in effect
//!
//! Failures are written as `{"error": ..., "message": ...}` with exit status 1.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use medops_baseline::init_model_dir;
use medops_engine::{AnalyticsEngine, EngineConfig, SyntheticSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod input;

use commands::Command;
use error::{CliError, CliResult};

/// medops CLI
#[derive(Parser)]
#[command(name = "medops")]
#[command(about = "Hospital operations analytics: resource optimization, anomaly detection, outbreak prediction", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MEDOPS_CONFIG")]
    config: Option<String>,

    /// Directory holding the baseline snapshot
    #[arg(long, env = "MEDOPS_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(long, env = "MEDOPS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "MEDOPS_LOG_JSON")]
    json_logs: bool,

    /// Request document; `-` reads stdin
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Seed for synthetic data used in place of missing sections
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Single-line output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let payload = json!({
                "error": format!("{e:#}"),
                "message": command.failure_message(),
            });
            println!("{payload}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;
    init_tracing(&cli, &config);

    if let Some(dir) = &cli.model_dir {
        config.model_dir = dir.clone();
    }
    let model_dir = init_model_dir(&config.model_dir).map_err(CliError::from)?;
    info!(model_dir = %model_dir.display(), "starting medops");

    let engine = AnalyticsEngine::open(config).map_err(CliError::from)?;
    let raw = read_input(cli.input.as_ref())?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Utc::now();
    let mut synthetic = SyntheticSource::new(rng, now);

    let output = commands::execute(cli.command, &engine, &raw, &mut synthetic, now)?;
    print_output(&output, cli.compact)?;
    Ok(())
}

fn load_config(cli: &Cli) -> CliResult<EngineConfig> {
    EngineConfig::load(cli.config.as_deref()).map_err(|e| CliError::Config(e.to_string()))
}

fn init_tracing(cli: &Cli, config: &EngineConfig) {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    // stdout carries the report, so logs go to stderr.
    if cli.json_logs || config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_input(path: Option<&PathBuf>) -> CliResult<String> {
    match path {
        None => Ok(String::new()),
        Some(p) if p.as_os_str() == "-" => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
        Some(p) => Ok(std::fs::read_to_string(p)?),
    }
}

fn print_output(output: &Value, compact: bool) -> CliResult<()> {
    let text = if compact {
        serde_json::to_string(output)?
    } else {
        serde_json::to_string_pretty(output)?
    };
    println!("{text}");
    Ok(())
}
