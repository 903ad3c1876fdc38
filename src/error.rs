//! Error types for the simulator

use thiserror::Error;

/// Simulator errors
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster error: {0}")]
    Roster(String),
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;
