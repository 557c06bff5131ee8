//! Fixed-step time integrators for the solar-system engine
//!
//! Both schemes split a step in two: every body gets a new position from the
//! accelerations sampled at the old positions, and only once all positions are
//! committed does every body get a new velocity from accelerations sampled at
//! the new positions. The engine drives that split; an [`Integrator`] only
//! supplies the two update formulas for a single body

use super::states::{Body, NVec2};

/// One integration scheme, chosen once per engine
pub trait Integrator: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Next position of `body`
    ///
    /// `accel` is the body's acceleration at the pre-update positions of the
    /// whole set; it becomes the body's current acceleration sample
    fn next_position(&self, body: &mut Body, accel: NVec2, dt: f64) -> NVec2;

    /// Next velocity of `body`, rolling its acceleration memory
    ///
    /// `next_accel` is the body's acceleration at the committed positions.
    /// Afterwards `a_prev` holds the old current sample and `a` holds `next_accel`
    fn next_velocity(&self, body: &mut Body, next_accel: NVec2, dt: f64) -> NVec2;
}

/// Beeman's multi-step predictor
///
/// Blends the current and previous acceleration samples, which keeps the
/// total energy of a bound orbit steady over many periods
#[derive(Debug, Clone, Copy, Default)]
pub struct Beeman;

impl Integrator for Beeman {
    fn name(&self) -> &'static str {
        "beeman"
    }

    fn next_position(&self, body: &mut Body, accel: NVec2, dt: f64) -> NVec2 {
        body.a = accel;

        // x_n+1 = x_n + v_n dt + (4 a_n - a_n-1) dt^2 / 6
        body.x + body.v * dt + (4.0 * body.a - body.a_prev) * (dt * dt / 6.0)
    }

    fn next_velocity(&self, body: &mut Body, next_accel: NVec2, dt: f64) -> NVec2 {
        // v_n+1 = v_n + (2 a_n+1 + 5 a_n - a_n-1) dt / 6
        let v = body.v + (2.0 * next_accel + 5.0 * body.a - body.a_prev) * (dt / 6.0);

        body.a_prev = body.a;
        body.a = next_accel;
        v
    }
}

/// Forward (direct) Euler, first order in both position and velocity
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn name(&self) -> &'static str {
        "euler"
    }

    fn next_position(&self, body: &mut Body, accel: NVec2, dt: f64) -> NVec2 {
        body.a = accel;

        // x_n+1 = x_n + v_n dt
        body.x + body.v * dt
    }

    fn next_velocity(&self, body: &mut Body, next_accel: NVec2, dt: f64) -> NVec2 {
        // v_n+1 = v_n + a_n dt, with a_n sampled before the positions moved
        let v = body.v + body.a * dt;

        body.a_prev = body.a;
        body.a = next_accel;
        v
    }
}
