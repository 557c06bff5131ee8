//! The simulation engine
//!
//! Owns the ordered body set, the fixed parameters, the chosen integrator and
//! the elapsed step count. Consumers call [`Engine::advance_one_step`] in a
//! loop and read state between calls; the engine never bounds how many steps
//! a consumer takes

use std::collections::HashSet;

use crate::configuration::config::BodyRecord;
use crate::error::{SimError, SimResult};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::Integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

pub struct Engine {
    bodies: Vec<Body>, // insertion order is iteration order
    params: Parameters,
    gravity: NewtonianGravity,
    integrator: Box<dyn Integrator>,
    steps: u64, // steps since construction or the last reset
}

impl Engine {
    /// Build an engine over `bodies`, in the given order
    ///
    /// Every body's mass is checked, names must be unique and acceleration
    /// memory starts at zero
    pub fn new(
        params: Parameters,
        integrator: Box<dyn Integrator>,
        mut bodies: Vec<Body>,
    ) -> SimResult<Self> {
        params.validate()?;

        {
            let mut seen = HashSet::with_capacity(bodies.len());
            for body in &bodies {
                body.validate()?;
                if !seen.insert(body.name.as_str()) {
                    return Err(SimError::DuplicateName(body.name.clone()));
                }
            }
        }

        for body in bodies.iter_mut() {
            body.clear_memory();
        }

        log::info!(
            "engine ready: {} bodies, dt = {} s, integrator = {}",
            bodies.len(),
            params.timestep,
            integrator.name()
        );

        Ok(Self {
            bodies,
            gravity: NewtonianGravity::new(params.g),
            params,
            integrator,
            steps: 0,
        })
    }

    /// Build an engine from parsed input records, keeping their order
    pub fn from_records(
        params: Parameters,
        integrator: Box<dyn Integrator>,
        records: Vec<BodyRecord>,
    ) -> SimResult<Self> {
        let bodies = records
            .into_iter()
            .map(Body::from_record)
            .collect::<SimResult<Vec<_>>>()?;
        Self::new(params, integrator, bodies)
    }

    /// Advance every body by one timestep
    ///
    /// Positions of the whole set are computed from the current state and
    /// committed together; velocities are then computed from forces at the
    /// committed positions
    pub fn advance_one_step(&mut self) {
        self.steps += 1;

        let dt = self.params.timestep;
        let integrator = self.integrator.as_ref();

        // Position phase: a_n from x_n for every body before anything moves
        let accels = self.gravity.accelerations(&self.bodies);
        let next_positions: Vec<NVec2> = self
            .bodies
            .iter_mut()
            .zip(accels)
            .map(|(b, a)| integrator.next_position(b, a, dt))
            .collect();

        for (b, x) in self.bodies.iter_mut().zip(next_positions) {
            b.x = x;
        }

        // Velocity phase: a_n+1 from the committed x_n+1
        let next_accels = self.gravity.accelerations(&self.bodies);
        for (b, a) in self.bodies.iter_mut().zip(next_accels) {
            b.v = integrator.next_velocity(b, a, dt);
        }

        log::trace!("step {} done, t = {} s", self.steps, self.elapsed());
    }

    /// Advance `steps` timesteps
    pub fn advance(&mut self, steps: u64) {
        for _ in 0..steps {
            self.advance_one_step();
        }
    }

    /// Body with the given name, if the engine has one
    pub fn lookup(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    /// Add a body mid-run; it attracts and is attracted from the next step on
    ///
    /// Its acceleration memory is cleared so the first Beeman step does not
    /// blend in history from wherever the body came from
    pub fn append(&mut self, mut body: Body) -> SimResult<()> {
        body.validate()?;
        if self.lookup(&body.name).is_some() {
            return Err(SimError::DuplicateName(body.name));
        }

        body.clear_memory();
        log::debug!(
            "appending `{}` at t = {} s (step {})",
            body.name,
            self.elapsed(),
            self.steps
        );
        self.bodies.push(body);
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Simulated seconds since construction or the last reset
    ///
    /// Derived from the step count, so k steps read back as exactly `k * dt`
    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.params.timestep
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Restart the elapsed-time clock; body state is untouched
    pub fn reset_elapsed(&mut self) {
        self.steps = 0;
    }

    pub fn timestep(&self) -> f64 {
        self.params.timestep
    }

    pub fn g(&self) -> f64 {
        self.params.g
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("bodies", &self.bodies)
            .field("params", &self.params)
            .field("integrator", &self.integrator.name())
            .field("steps", &self.steps)
            .finish()
    }
}
