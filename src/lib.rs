pub mod simulation;
pub mod configuration;
pub mod analysis;
pub mod error;

pub use simulation::states::{Body, NVec2};
pub use simulation::params::{Parameters, G_SI};
pub use simulation::forces::NewtonianGravity;
pub use simulation::integrator::{Beeman, ForwardEuler, Integrator};
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, BodyRecord, ScenarioConfig};
pub use configuration::config::{read_body_records, load_body_records};

pub use error::{SimError, SimResult};
