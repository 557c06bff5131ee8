//! Orbital period estimates from the current state
//!
//! Assumes near-circular orbits: the period is the circumference at the
//! current distance divided by the current speed, both measured relative to
//! the body being orbited

use std::f64::consts::PI;

use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::states::Body;

/// Circular-orbit period of `body` around `reference`, in seconds
///
/// `None` when the body does not move relative to the reference (this
/// includes the reference itself)
pub fn circular_period(body: &Body, reference: &Body) -> Option<f64> {
    let r = (body.x - reference.x).norm();
    let speed = (body.v - reference.v).norm();
    if speed == 0.0 {
        return None;
    }
    Some(2.0 * PI * r / speed)
}

/// Period of every body around `reference`, as a multiple of `unit`'s period
///
/// The reference itself is skipped; the result follows the engine's body order
pub fn relative_periods(
    engine: &Engine,
    reference: &str,
    unit: &str,
) -> SimResult<Vec<(String, f64)>> {
    let reference_body = engine
        .lookup(reference)
        .ok_or_else(|| SimError::MissingBody(reference.to_string()))?;
    let unit_body = engine
        .lookup(unit)
        .ok_or_else(|| SimError::MissingBody(unit.to_string()))?;
    let unit_period = circular_period(unit_body, reference_body)
        .ok_or_else(|| SimError::NotOrbiting(unit.to_string()))?;

    Ok(engine
        .bodies()
        .iter()
        .filter(|b| b.name != reference)
        .filter_map(|b| {
            circular_period(b, reference_body).map(|p| (b.name.clone(), p / unit_period))
        })
        .collect())
}
