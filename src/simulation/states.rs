//! Core state type for the solar-system simulation
//!
//! A `Body` is a plain record: name, mass, position and velocity in SI units,
//! plus the two acceleration samples the Beeman integrator blends. Radius and
//! color ride along for whoever draws the bodies; the physics never reads them

use nalgebra::Vector2;

use crate::configuration::config::BodyRecord;
use crate::error::{SimError, SimResult};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // unique within one engine
    pub m: f64, // mass (kg), always > 0
    pub x: NVec2, // position (m)
    pub v: NVec2, // velocity (m/s)
    pub a: NVec2, // current acceleration
    pub a_prev: NVec2, // acceleration of the previous step
    pub radius: f64, // display radius
    pub color: String, // display color
}

impl Body {
    /// Create a body with zeroed acceleration memory
    ///
    /// Fails with [`SimError::NonPositiveMass`] unless `m` is positive and finite
    pub fn new(
        name: impl Into<String>,
        m: f64,
        x: NVec2,
        v: NVec2,
        radius: f64,
        color: impl Into<String>,
    ) -> SimResult<Self> {
        let body = Self {
            name: name.into(),
            m,
            x,
            v,
            a: NVec2::zeros(),
            a_prev: NVec2::zeros(),
            radius,
            color: color.into(),
        };
        body.validate()?;
        Ok(body)
    }

    /// Build a body from one parsed input record, preserving its fields as-is
    pub fn from_record(record: BodyRecord) -> SimResult<Self> {
        Self::new(
            record.name,
            record.mass,
            NVec2::new(record.x, record.y),
            NVec2::new(record.vx, record.vy),
            record.radius,
            record.color,
        )
    }

    /// Check the mass invariant
    pub fn validate(&self) -> SimResult<()> {
        // NaN fails this comparison too
        if self.m > 0.0 && self.m.is_finite() {
            Ok(())
        } else {
            Err(SimError::NonPositiveMass {
                name: self.name.clone(),
                mass: self.m,
            })
        }
    }

    /// Forget any acceleration history
    pub fn clear_memory(&mut self) {
        self.a = NVec2::zeros();
        self.a_prev = NVec2::zeros();
    }
}
