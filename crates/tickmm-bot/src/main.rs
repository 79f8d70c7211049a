//! tickmm replay driver - Entry Point
//!
//! Reads JSON-lines snapshots from a file or stdin and prints one tick
//! record per snapshot to stdout.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

/// Tick-driven market-making engine replay
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via TICKMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON-lines snapshot file; stdin when omitted
    #[arg(short, long)]
    input: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tickmm_telemetry::init_logging()?;

    info!("Starting tickmm v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > TICKMM_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("TICKMM_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = tickmm_bot::AppConfig::from_file(&config_path)?;
    let mut app = tickmm_bot::Application::new(config)?;

    let strategy = app.engine().config();
    info!(
        products = strategy.products.len(),
        position_limit = strategy.position_limit,
        "Configuration loaded"
    );

    let stdout = io::stdout().lock();
    match args.input {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening input {path}"))?;
            app.replay(BufReader::new(file), stdout)?;
        }
        None => {
            app.replay(io::stdin().lock(), stdout)?;
        }
    }

    Ok(())
}
