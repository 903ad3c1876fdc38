//! Configuration for a generation run.

use std::path::PathBuf;

/// Seconds between consecutive rows of a device's series.
pub const STEP_SECONDS: i64 = 30;

/// How far before "now" each device's series starts.
pub const LOOKBACK_HOURS: i64 = 24;

/// Main configuration for the simulator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON device roster
    pub roster_path: PathBuf,

    /// Number of rows to generate per device
    pub rows_per_device: usize,

    /// Output CSV file path
    pub output_path: PathBuf,

    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}
