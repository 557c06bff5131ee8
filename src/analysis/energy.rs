//! Total-energy bookkeeping for checking how well an integrator conserves energy

use crate::configuration::config::IntegratorConfig;
use crate::simulation::engine::Engine;
use crate::simulation::states::Body;

/// Sum of 1/2 m |v|^2 over the set
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
}

/// Kinetic plus pairwise gravitational potential energy of the engine's bodies
pub fn total_energy(engine: &Engine) -> f64 {
    let bodies = engine.bodies();
    kinetic_energy(bodies) + engine.gravity().potential_energy(bodies)
}

/// Upper bound on the samples reserved up front; longer traces grow as they go
const MAX_RESERVED_SAMPLES: usize = 1 << 20;

/// Default run length for an energy check. The Euler run is ten times longer
/// so its drift has room to build up
pub fn default_trace_steps(integrator: IntegratorConfig) -> u64 {
    match integrator {
        IntegratorConfig::Beeman => 500,
        IntegratorConfig::Euler => 5000,
    }
}

/// Total energy sampled before the run and after every step
#[derive(Debug, Clone, Default)]
pub struct EnergyTrace {
    pub energies: Vec<f64>,
}

impl EnergyTrace {
    /// Advance `engine` by `steps`, sampling the total energy as it goes
    pub fn record(engine: &mut Engine, steps: u64) -> Self {
        let mut energies = Vec::with_capacity(reserved_samples(steps));
        energies.push(total_energy(engine));

        for _ in 0..steps {
            engine.advance_one_step();
            energies.push(total_energy(engine));
        }

        log::debug!(
            "energy trace over {} steps ({}): drift {:e}",
            steps,
            engine.integrator_name(),
            relative_drift(&energies)
        );
        Self { energies }
    }

    pub fn initial(&self) -> Option<f64> {
        self.energies.first().copied()
    }

    pub fn drift(&self) -> f64 {
        relative_drift(&self.energies)
    }
}

fn reserved_samples(steps: u64) -> usize {
    usize::try_from(steps)
        .map_or(MAX_RESERVED_SAMPLES, |n| n.saturating_add(1))
        .min(MAX_RESERVED_SAMPLES)
}

/// Largest |E - E0| / |E0| over the samples; zero for fewer than two samples
/// or a zero initial energy
pub fn relative_drift(energies: &[f64]) -> f64 {
    let Some(&e0) = energies.first() else {
        return 0.0;
    };
    if e0 == 0.0 {
        return 0.0;
    }

    energies
        .iter()
        .map(|e| ((e - e0) / e0).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_is_capped() {
        assert_eq!(reserved_samples(0), 1);
        assert_eq!(reserved_samples(50), 51);
        assert_eq!(reserved_samples(u64::MAX), MAX_RESERVED_SAMPLES);
        assert_eq!(reserved_samples(MAX_RESERVED_SAMPLES as u64), MAX_RESERVED_SAMPLES);
    }
}
