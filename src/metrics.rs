//! Metric series synthesis with realistic failure patterns.
//!
//! Each device's series is a stateful random walk: a gaussian baseline per
//! metric, overlaid with drift episodes (gradual resource creep), spikes,
//! flatlines (stuck sensors), reboot events, and missing-value injection.

use crate::config::STEP_SECONDS;
use crate::roster::DeviceDescriptor;
use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use rand_distr::Normal;
use serde::{Serialize, Serializer};

/// Probability of a reboot event per row.
const REBOOT_PROB: f64 = 0.001;
/// Probability of starting a new drift episode per row.
const DRIFT_START_PROB: f64 = 0.002;
/// Probability of a utilization spike per row.
const SPIKE_PROB: f64 = 0.005;
/// Probability of starting a flatline per row.
const FLATLINE_START_PROB: f64 = 0.003;
/// Probability that a row has any sensor gaps at all.
const MISSING_PROB: f64 = 0.05;

/// One output row of synthesized telemetry.
///
/// The utilization and traffic fields are optional to model sensor gaps;
/// they serialize as empty CSV fields when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub device_id: String,
    pub device_type: String,
    pub system_uptime: i64,
    pub cpu_usage: Option<f64>,
    pub memory_usage: Option<f64>,
    pub inbound_traffic: Option<i64>,
    pub outbound_traffic: Option<i64>,
    pub input_errors: i64,
    pub output_errors: i64,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Per-device mutable state threaded across successive rows.
///
/// Created fresh at the start of each device's series and never shared.
#[derive(Debug, Clone)]
pub struct SeriesState {
    /// Timestamp of the most recently produced row
    pub current_time: DateTime<Utc>,
    /// Seconds since the device last (simulated) booted
    pub uptime: i64,
    /// Accumulated CPU baseline offset from the active drift episode
    pub cpu_drift: f64,
    /// Accumulated memory baseline offset; piggybacks on the CPU episode
    pub mem_drift: f64,
    /// Remaining rows of drift accumulation
    pub drift_steps: u32,
    /// Held CPU value while a flatline is active
    pub flatline_cpu: Option<f64>,
    /// Held memory value while a flatline is active
    pub flatline_mem: Option<f64>,
    /// Remaining flatline rows, shared by CPU and memory but decremented
    /// only in the CPU arm
    pub flatline_counter: u32,
}

/// Generates metric series for devices from a seedable random source.
pub struct MetricGenerator {
    rng: StdRng,
    cpu_noise: Normal<f64>,
    mem_noise: Normal<f64>,
    traffic_noise: Normal<f64>,
}

impl MetricGenerator {
    /// Creates a generator with a fixed seed, for deterministic output.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            cpu_noise: Normal::new(0.0, 5.0).expect("valid distribution parameters"),
            mem_noise: Normal::new(0.0, 7.0).expect("valid distribution parameters"),
            traffic_noise: Normal::new(200_000.0, 50_000.0)
                .expect("valid distribution parameters"),
        }
    }

    /// Creates fresh per-device state for a series starting at `start_time`.
    ///
    /// The device begins mid-life with a random uptime, so the first reboot
    /// event is a visible drop rather than a continuation.
    pub fn start_series(&mut self, start_time: DateTime<Utc>) -> SeriesState {
        SeriesState {
            current_time: start_time,
            uptime: self.rng.gen_range(20_000..=50_000),
            cpu_drift: 0.0,
            mem_drift: 0.0,
            drift_steps: 0,
            flatline_cpu: None,
            flatline_mem: None,
            flatline_counter: 0,
        }
    }

    /// Produces an ordered series of `rows` records for one device.
    pub fn generate(
        &mut self,
        device: &DeviceDescriptor,
        start_time: DateTime<Utc>,
        rows: usize,
    ) -> Vec<MetricRecord> {
        let mut state = self.start_series(start_time);
        (0..rows).map(|_| self.step(device, &mut state)).collect()
    }

    /// Advances the state by one row and produces the record for it.
    ///
    /// Two asymmetries are intentional:
    /// - the memory branch runs on reboot rows too, while CPU is overridden
    ///   by the reboot spike;
    /// - `flatline_counter` gates both metrics but only the CPU flatline arm
    ///   decrements it.
    pub fn step(&mut self, device: &DeviceDescriptor, state: &mut SeriesState) -> MetricRecord {
        state.current_time += Duration::seconds(STEP_SECONDS);
        state.uptime += STEP_SECONDS;

        let mut cpu_usage = if self.rng.gen_bool(REBOOT_PROB) {
            // Reboot: uptime resets and CPU pins high while services restart.
            state.uptime = self.rng.gen_range(1_000..=5_000);
            Some(self.rng.gen_range(80..=100) as f64)
        } else {
            if state.drift_steps > 0 {
                state.cpu_drift += 0.3;
                state.drift_steps -= 1;
            } else if self.rng.gen_bool(DRIFT_START_PROB) {
                state.drift_steps = self.rng.gen_range(50..=150);
                state.cpu_drift = 0.0;
            }

            if self.rng.gen_bool(SPIKE_PROB) {
                Some(self.rng.gen_range(80..=100) as f64)
            } else if state.flatline_cpu.is_some() && state.flatline_counter > 0 {
                state.flatline_counter -= 1;
                state.flatline_cpu
            } else if self.rng.gen_bool(FLATLINE_START_PROB) {
                let held = self.rng.gen_range(20..=50) as f64;
                state.flatline_cpu = Some(held);
                state.flatline_counter = self.rng.gen_range(10..=20);
                Some(held)
            } else {
                let noise = self.cpu_noise.sample(&mut self.rng);
                Some((30.0 + noise + state.cpu_drift).clamp(5.0, 100.0))
            }
        };

        // Memory also creeps during a drift episode, at its own rate.
        if state.drift_steps > 0 {
            state.mem_drift += 0.2;
        }
        let mut memory_usage = if self.rng.gen_bool(SPIKE_PROB) {
            Some(self.rng.gen_range(80..=95) as f64)
        } else if state.flatline_mem.is_some() && state.flatline_counter > 0 {
            state.flatline_mem
        } else if self.rng.gen_bool(FLATLINE_START_PROB) {
            let held = self.rng.gen_range(40..=60) as f64;
            state.flatline_mem = Some(held);
            state.flatline_counter = self.rng.gen_range(10..=20);
            Some(held)
        } else {
            let noise = self.mem_noise.sample(&mut self.rng);
            Some((50.0 + noise + state.mem_drift).clamp(10.0, 100.0))
        };

        let mut inbound_traffic =
            Some((self.traffic_noise.sample(&mut self.rng).round() as i64).max(1_000));
        let mut outbound_traffic =
            Some((self.traffic_noise.sample(&mut self.rng).round() as i64).max(1_000));

        let input_errors = weighted_choice(&mut self.rng, &[(0, 90), (1, 5), (2, 4), (10, 1)]);
        let output_errors = weighted_choice(&mut self.rng, &[(0, 92), (1, 5), (2, 2), (5, 1)]);

        // Sensor gaps: one outer draw per row, then per-field nulling.
        if self.rng.gen_bool(MISSING_PROB) {
            if self.rng.gen_bool(0.5) {
                cpu_usage = None;
            }
            if self.rng.gen_bool(0.3) {
                memory_usage = None;
            }
            if self.rng.gen_bool(0.2) {
                inbound_traffic = None;
            }
            if self.rng.gen_bool(0.2) {
                outbound_traffic = None;
            }
        }

        MetricRecord {
            timestamp: state.current_time,
            device_id: device.device_id.clone(),
            device_type: device.device_type.clone(),
            system_uptime: state.uptime,
            cpu_usage,
            memory_usage,
            inbound_traffic,
            outbound_traffic,
            input_errors,
            output_errors,
        }
    }
}

/// Draws an error-counter value from a small table of (value, weight) pairs.
fn weighted_choice<T: Copy>(rng: &mut impl Rng, items: &[(T, u32)]) -> T {
    let total: u32 = items.iter().map(|(_, w)| w).sum();
    let mut choice = rng.gen_range(0..total);

    for (item, weight) in items {
        if choice < *weight {
            return *item;
        }
        choice -= weight;
    }

    items[0].0
}
