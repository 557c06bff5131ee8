//! Planetary alignment as seen from a reference body
//!
//! Two bodies are "aligned within a threshold" when the angle between them,
//! measured at the reference, is below the threshold. The whole set is
//! aligned when every pair of non-reference bodies is

use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::states::Body;

/// Angle in radians between `a` and `b` as seen from `reference`, in `[0, pi]`
///
/// A body sitting on the reference has no direction; the angle is then 0
pub fn angle_between(reference: &Body, a: &Body, b: &Body) -> f64 {
    let ra = a.x - reference.x;
    let rb = b.x - reference.x;
    let denom = ra.norm() * rb.norm();
    if denom == 0.0 {
        return 0.0;
    }

    // Rounding can push the cosine just past +-1
    (ra.dot(&rb) / denom).clamp(-1.0, 1.0).acos()
}

/// Whether every pair of bodies other than `reference` lies within `threshold` radians
///
/// Fewer than two such bodies never count as aligned
pub fn all_aligned(engine: &Engine, reference: &str, threshold: f64) -> SimResult<bool> {
    let reference_body = engine
        .lookup(reference)
        .ok_or_else(|| SimError::MissingBody(reference.to_string()))?;

    let others: Vec<&Body> = engine
        .bodies()
        .iter()
        .filter(|b| b.name != reference)
        .collect();
    if others.len() < 2 {
        return Ok(false);
    }

    for (i, a) in others.iter().enumerate() {
        for b in &others[i + 1..] {
            if angle_between(reference_body, a, b) >= threshold {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Time in seconds for the bodies to come back into alignment
///
/// Steps until the set is no longer aligned, restarts the engine's clock,
/// then steps until it is aligned again. Returns `None` if `max_steps` steps
/// in total pass without that happening; the engine is left wherever it got to
pub fn time_to_realign(
    engine: &mut Engine,
    reference: &str,
    threshold: f64,
    max_steps: u64,
) -> SimResult<Option<f64>> {
    let mut taken = 0;

    while all_aligned(engine, reference, threshold)? {
        if taken == max_steps {
            return Ok(None);
        }
        engine.advance_one_step();
        taken += 1;
    }

    log::debug!("alignment broken after {taken} steps, starting the clock");
    engine.reset_elapsed();

    while !all_aligned(engine, reference, threshold)? {
        if taken == max_steps {
            return Ok(None);
        }
        engine.advance_one_step();
        taken += 1;
    }

    Ok(Some(engine.elapsed()))
}
