//! Error types for loading and setting up a run
//!
//! Per-step physics never fails; these cover data and configuration only.

use thiserror::Error;

/// Result type for setup operations
pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Star not found: {0}")]
    StarNotFound(String),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
