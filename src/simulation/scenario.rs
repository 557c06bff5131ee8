//! Build a ready-to-run engine from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`: the
//! parameters, the integrator choice and the initial bodies in input order.
//! Bodies can still be dropped here, before the engine exists; once the
//! engine is built the set only grows

use crate::configuration::config::{IntegratorConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::Body;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub integrator: IntegratorConfig,
    pub bodies: Vec<Body>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Bodies: file records first, then inline ones, each mapped to a runtime `Body`
        let bodies = cfg
            .body_records()?
            .into_iter()
            .map(Body::from_record)
            .collect::<SimResult<Vec<_>>>()?;

        let parameters = Parameters::new(cfg.parameters.timestep, cfg.parameters.g);
        parameters.validate()?;

        let mut scenario = Self {
            parameters,
            integrator: cfg.engine.integrator,
            bodies,
        };
        for name in &cfg.exclude {
            scenario = scenario.exclude(name)?;
        }

        Ok(scenario)
    }

    /// Drop the named body. Naming a body that isn't in the set is an error,
    /// so a typo can't leave it in the run
    pub fn exclude(mut self, name: &str) -> SimResult<Self> {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.name != name);
        if self.bodies.len() == before {
            return Err(SimError::MissingBody(name.to_string()));
        }
        log::debug!("excluding body `{name}`");
        Ok(self)
    }

    /// Drop the last listed body (the outermost planet in the solar-system data)
    pub fn without_outermost(mut self) -> Self {
        if let Some(body) = self.bodies.pop() {
            log::debug!("excluding outermost body `{}`", body.name);
        }
        self
    }

    pub fn with_integrator(mut self, integrator: IntegratorConfig) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.parameters.timestep = timestep;
        self
    }

    pub fn into_engine(self) -> SimResult<Engine> {
        Engine::new(self.parameters, self.integrator.build(), self.bodies)
    }
}
