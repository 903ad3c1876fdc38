//! CLI entry point for the fleet telemetry simulator.

use anyhow::Result;
use clap::Parser;
use fleet_telemetry_simulator::{run, Config, MetricGenerator};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fleet-telemetry-simulator")]
#[command(about = "Generates synthetic device telemetry CSVs from a device roster")]
#[command(version)]
struct Cli {
    /// Path to the JSON device roster
    #[arg(short, long)]
    config: PathBuf,

    /// Number of rows to generate per device
    #[arg(short, long)]
    rows: usize,

    /// Output CSV file path
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config {
        roster_path: cli.config,
        rows_per_device: cli.rows,
        output_path: cli.output,
        seed: None,
    };

    let mut generator = match config.seed {
        Some(seed) => MetricGenerator::new(seed),
        None => MetricGenerator::from_entropy(),
    };

    let summary = run(&config, &mut generator)?;
    info!(
        "Run complete: {} devices, {} rows",
        summary.device_count, summary.rows_written
    );
    println!(
        "Generated {} rows of data and saved to {}",
        summary.rows_written,
        summary.output_path.display()
    );

    Ok(())
}
