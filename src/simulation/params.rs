//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the settings fixed for the lifetime of one engine:
//! - the integration step size in seconds,
//! - the gravitational constant `g`

use crate::error::{SimError, SimResult};

/// Newtonian gravitational constant in SI units
pub const G_SI: f64 = 6.6743e-11;

/// Default step size, a little over a day
pub const DEFAULT_TIMESTEP: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub timestep: f64, // step size (s)
    pub g: f64, // gravitational constant
}

impl Parameters {
    pub fn new(timestep: f64, g: f64) -> Self {
        Self { timestep, g }
    }

    /// Parameters in SI units with the given step size
    pub fn si(timestep: f64) -> Self {
        Self::new(timestep, G_SI)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.timestep > 0.0 && self.timestep.is_finite() {
            Ok(())
        } else {
            Err(SimError::InvalidTimestep(self.timestep))
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::si(DEFAULT_TIMESTEP)
    }
}
