//! Error types for loading scenarios and building the engine

use thiserror::Error;

/// Result type for simulation setup and analysis
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building a simulation or running an analysis over it
///
/// Everything except [`SimError::MissingBody`] and [`SimError::NotOrbiting`] is
/// a construction-time failure: no partially-built engine is handed out when
/// one of these is returned. `MissingBody` is also raised while building a
/// scenario whose `exclude` list names an unknown body
#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed body record: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed scenario file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("body `{name}` has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("body `{0}` not found")]
    MissingBody(String),

    #[error("body `{0}` is not moving relative to the reference body")]
    NotOrbiting(String),
}
