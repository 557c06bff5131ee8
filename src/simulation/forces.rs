//! Gravitational force evaluation for the solar-system engine
//!
//! Direct O(n^2) Newtonian gravity without softening. The engine calls
//! [`NewtonianGravity::acceleration`] once per body per phase, so a step costs
//! two full passes over every pair

use crate::simulation::states::{Body, NVec2};

/// Plain Newtonian gravity between point masses
///
/// Coincident bodies exert no force on each other instead of dividing by zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Net force on `bodies[target]` from every other body in the slice
    ///
    /// The target is skipped by index, so two distinct bodies that happen to
    /// share a state still attract (or cancel, when coincident). Contributions
    /// are summed in slice order
    pub fn net_force(&self, target: usize, bodies: &[Body]) -> NVec2 {
        let bi = &bodies[target];
        let mut total = NVec2::zeros();

        for (j, bj) in bodies.iter().enumerate() {
            if j == target {
                continue;
            }

            // r points from the target towards the other body, which is the
            // direction the target gets pulled
            let r = bj.x - bi.x;
            let r2 = r.norm_squared();

            // Coincident pair: no direction, no force
            if r2 == 0.0 {
                continue;
            }

            // |F| = G m_i m_j / |r|^2 along r / |r|
            let magnitude = self.g * bi.m * bj.m / r2;
            total += magnitude * (r / r2.sqrt());
        }

        total
    }

    /// Acceleration of `bodies[target]`, i.e. net force over its mass
    pub fn acceleration(&self, target: usize, bodies: &[Body]) -> NVec2 {
        self.net_force(target, bodies) / bodies[target].m
    }

    /// Accelerations of every body at the current positions, in slice order
    #[cfg(not(feature = "parallel"))]
    pub fn accelerations(&self, bodies: &[Body]) -> Vec<NVec2> {
        (0..bodies.len())
            .map(|i| self.acceleration(i, bodies))
            .collect()
    }

    /// Accelerations of every body at the current positions, in slice order
    ///
    /// Each body's sum only reads the shared slice, so the bodies are split
    /// across the rayon pool; the result order still follows the slice
    #[cfg(feature = "parallel")]
    pub fn accelerations(&self, bodies: &[Body]) -> Vec<NVec2> {
        use rayon::prelude::*;

        (0..bodies.len())
            .into_par_iter()
            .map(|i| self.acceleration(i, bodies))
            .collect()
    }

    /// Gravitational potential energy of the whole set, summed over unordered pairs
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let mut total = 0.0;
        for (i, bi) in bodies.iter().enumerate() {
            for bj in &bodies[i + 1..] {
                let r = (bj.x - bi.x).norm();
                if r == 0.0 {
                    continue;
                }
                total -= self.g * bi.m * bj.m / r;
            }
        }
        total
    }
}
