//! Sequential generation run over a device roster.

use crate::config::{Config, LOOKBACK_HOURS};
use crate::error::Result;
use crate::metrics::MetricGenerator;
use crate::roster::load_roster;
use crate::writer::CsvSink;
use chrono::{Duration, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub device_count: usize,
    pub rows_written: u64,
    pub output_path: PathBuf,
}

/// Loads the roster and generates `rows_per_device` rows for each device,
/// streaming them into the output CSV in roster order.
///
/// Each series starts 24 hours in the past and steps forward in 30-second
/// increments. Devices are processed strictly sequentially so the output
/// ordering is stable.
pub fn run(config: &Config, generator: &mut MetricGenerator) -> Result<RunSummary> {
    let devices = load_roster(&config.roster_path)?;
    info!("Generating data for {} devices", devices.len());

    let start_time = Utc::now() - Duration::hours(LOOKBACK_HOURS);
    let mut sink = CsvSink::create(&config.output_path)?;

    let progress = ProgressBar::new(devices.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} devices [{elapsed_precise}]")
            .expect("Invalid progress style template"),
    );

    for device in &devices {
        let records = generator.generate(device, start_time, config.rows_per_device);
        for record in &records {
            sink.append(record)?;
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let rows_written = sink.finish()?;
    Ok(RunSummary {
        device_count: devices.len(),
        rows_written,
        output_path: config.output_path.clone(),
    })
}
