//! Synthetic telemetry generator for a fleet of simulated network devices.
//!
//! Reads a JSON device roster, produces N timestamped metric rows per device
//! (CPU/memory utilization, traffic counters, error counters), and writes the
//! whole run to a single CSV file. One-shot batch tool, not a service.
//!
//! The metric model is a stateful random walk combining gradual drift
//! episodes, spikes, stuck-sensor flatlines, reboot events, and missing-value
//! injection. It is a heuristic approximation for downstream testing and
//! demos, not a calibrated simulator.
//!
//! # Usage
//! ```bash
//! fleet-telemetry-simulator --config devices.json --rows 2880 --output telemetry.csv
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod roster;
pub mod runner;
pub mod writer;

pub use config::Config;
pub use error::{Result, SimulatorError};
pub use metrics::{MetricGenerator, MetricRecord, SeriesState};
pub use roster::{load_roster, DeviceDescriptor};
pub use runner::{run, RunSummary};
