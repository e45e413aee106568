//! Unified error types for the electrify workspace
//!
//! [`ElectrifyError`] covers every failure that can stop the planning
//! pipeline: bad input tables, invalid cost constants, topology that does not
//! span the clusters, and coordinates that cannot be matched unambiguously.
//! The greedy planner itself never fails once a network has been resolved.
//!
//! # Example
//!
//! ```ignore
//! use electrify_core::{ElectrifyError, ElectrifyResult};
//!
//! fn plan(path: &str) -> ElectrifyResult<()> {
//!     let config = PlannerConfig::load_from(path)?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all planning operations.
#[derive(Error, Debug)]
pub enum ElectrifyError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input rows with non-finite or negative values
    #[error("Input error: {0}")]
    Input(String),

    /// Configuration errors (missing or out-of-range cost constants)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Topology does not form a spanning tree over the clusters
    #[error("Topology error: {0}")]
    Topology(String),

    /// Coordinates that cannot be matched unambiguously
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using ElectrifyError.
pub type ElectrifyResult<T> = Result<T, ElectrifyError>;

impl From<anyhow::Error> for ElectrifyError {
    fn from(err: anyhow::Error) -> Self {
        ElectrifyError::Other(err.to_string())
    }
}

impl From<String> for ElectrifyError {
    fn from(s: String) -> Self {
        ElectrifyError::Other(s)
    }
}

impl From<&str> for ElectrifyError {
    fn from(s: &str) -> Self {
        ElectrifyError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for ElectrifyError {
    fn from(err: serde_json::Error) -> Self {
        ElectrifyError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for ElectrifyError {
    fn from(err: toml::de::Error) -> Self {
        ElectrifyError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ElectrifyError {
    fn from(err: toml::ser::Error) -> Self {
        ElectrifyError::Other(err.to_string())
    }
}
