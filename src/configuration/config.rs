//! Configuration types for loading simulation scenarios
//!
//! A scenario is a small YAML file naming the integrator and parameters, plus
//! the initial bodies, either inline or in a headerless CSV file with one body
//! per line:
//!
//! ```text
//! name, mass, x, y, vx, vy, radius, color
//! Sun, 1.989e30, 0, 0, 0, 0, 10, yellow
//! Earth, 5.972e24, 1.496e11, 0, 0, 29784, 3, blue
//! ```
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "beeman"      # or "euler"
//!
//! parameters:
//!   timestep: 100000.0        # seconds per step
//!   G: 6.6743e-11             # gravitational constant, optional
//!
//! bodies_file: "solar_system.csv"   # relative to this YAML file
//!
//! bodies:                     # optional, appended after the file's bodies
//!   - name: "Comet"
//!     mass: 1.0e14
//!     x: [ 3.0e11, 0.0 ]
//!     v: [ 0.0, 1.2e4 ]
//!
//! exclude: [ "Jupiter" ]      # dropped before the run starts
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SimResult;
use crate::simulation::integrator::{Beeman, ForwardEuler, Integrator};
use crate::simulation::params::{DEFAULT_TIMESTEP, G_SI};

/// Which integrator the engine steps with
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "beeman")] // Multi-step predictor, good long-term energy behaviour
    Beeman,

    #[serde(rename = "euler")] // Forward Euler, first order, drifts quickly
    Euler,
}

impl IntegratorConfig {
    pub fn build(self) -> Box<dyn Integrator> {
        match self {
            IntegratorConfig::Beeman => Box::new(Beeman),
            IntegratorConfig::Euler => Box::new(ForwardEuler),
        }
    }
}

/// Engine-level options
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig,
}

/// Numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_timestep")]
    pub timestep: f64, // seconds per step
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            g: G_SI,
        }
    }
}

fn default_timestep() -> f64 {
    DEFAULT_TIMESTEP
}

fn default_g() -> f64 {
    G_SI
}

/// One body as listed in a CSV body file, columns in file order
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub name: String,
    pub mass: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: String,
}

/// One body listed inline in the YAML scenario
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    pub x: [f64; 2], // initial position (m)
    pub v: [f64; 2], // initial velocity (m/s)
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_radius() -> f64 {
    1.0
}

fn default_color() -> String {
    "white".to_string()
}

impl From<BodyConfig> for BodyRecord {
    fn from(cfg: BodyConfig) -> Self {
        Self {
            name: cfg.name,
            mass: cfg.mass,
            x: cfg.x[0],
            y: cfg.x[1],
            vx: cfg.v[0],
            vy: cfg.v[1],
            radius: cfg.radius,
            color: cfg.color,
        }
    }
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bodies_file: Option<PathBuf>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ScenarioConfig {
    pub fn from_reader(reader: impl Read) -> SimResult<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Load a scenario file; a relative `bodies_file` is resolved against the
    /// directory holding the YAML
    pub fn load(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        let mut cfg = Self::from_reader(BufReader::new(file))?;

        if let (Some(bodies_file), Some(dir)) = (cfg.bodies_file.as_mut(), path.parent()) {
            if bodies_file.is_relative() {
                *bodies_file = dir.join(&*bodies_file);
            }
        }

        Ok(cfg)
    }

    /// All body records: the file's first, in file order, then the inline ones
    pub fn body_records(&self) -> SimResult<Vec<BodyRecord>> {
        let mut records = match &self.bodies_file {
            Some(path) => load_body_records(path)?,
            None => Vec::new(),
        };
        records.extend(self.bodies.iter().cloned().map(BodyRecord::from));
        Ok(records)
    }
}

/// Parse headerless CSV body records, preserving their order
///
/// A missing column or a field that does not parse as a number fails the
/// whole read
pub fn read_body_records(reader: impl Read) -> SimResult<Vec<BodyRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: BodyRecord = result?;
        records.push(record);
    }

    log::debug!("parsed {} body records", records.len());
    Ok(records)
}

pub fn load_body_records(path: &Path) -> SimResult<Vec<BodyRecord>> {
    log::info!("loading bodies from {}", path.display());
    let file = File::open(path)?;
    read_body_records(BufReader::new(file))
}
