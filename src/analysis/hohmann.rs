//! Hohmann transfer planning between two bodies orbiting a common reference
//!
//! The closed-form pieces (transfer ellipse, phase angle, launch speed) assume
//! circular, coplanar orbits. [`launch_probe`] then checks a plan against the
//! full n-body engine by injecting a probe and tracking how close it gets to
//! the target

use std::f64::consts::{PI, TAU};

use crate::analysis::orbit::circular_period;
use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::states::{Body, NVec2};

/// Semi-major axis of the ellipse touching both orbit radii
pub fn semi_major_axis(r1: f64, r2: f64) -> f64 {
    0.5 * (r1 + r2)
}

/// Full period of an orbit with semi-major axis `a` around a body with `mu = G M`
pub fn transfer_period(a: f64, mu: f64) -> f64 {
    (4.0 * PI * PI * a.powi(3) / mu).sqrt()
}

/// How far (radians) the target must lead the origin at launch
///
/// The probe flies half the transfer ellipse, during which the target sweeps
/// `pi * transfer / target_period`; the probe itself sweeps `pi`
pub fn phase_angle(transfer_period: f64, target_period: f64) -> f64 {
    (1.0 - transfer_period / target_period) * PI
}

/// Launch velocity at radius `r1` for a transfer out to `r2`, along `direction`
pub fn transfer_velocity(mu: f64, r1: f64, r2: f64, direction: NVec2) -> NVec2 {
    let speed = (2.0 * mu * r2 / (r1 * (r1 + r2))).sqrt();
    speed * direction.normalize()
}

/// Polar angle of `body` around `reference`, in `[0, 2 pi)`
pub fn polar_angle(body: &Body, reference: &Body) -> f64 {
    let r = body.x - reference.x;
    wrap_two_pi(r.y.atan2(r.x))
}

fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

fn wrap_pi(angle: f64) -> f64 {
    wrap_two_pi(angle + PI) - PI
}

/// Target lead over the origin minus the desired lead, wrapped to `[-pi, pi)`
fn phase_error(engine: &Engine, bodies: &TransferBodies, desired: f64) -> SimResult<f64> {
    let reference = require(engine, &bodies.reference)?;
    let origin = require(engine, &bodies.origin)?;
    let target = require(engine, &bodies.target)?;
    let phase = polar_angle(target, reference) - polar_angle(origin, reference);
    Ok(wrap_pi(phase - desired))
}

fn require<'a>(engine: &'a Engine, name: &str) -> SimResult<&'a Body> {
    engine
        .lookup(name)
        .ok_or_else(|| SimError::MissingBody(name.to_string()))
}

/// Which bodies a transfer runs between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferBodies {
    pub reference: String, // body both orbit, e.g. the Sun
    pub origin: String,
    pub target: String,
}

impl TransferBodies {
    pub fn new(
        reference: impl Into<String>,
        origin: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            origin: origin.into(),
            target: target.into(),
        }
    }
}

/// Closed-form Hohmann transfer from the engine's current state
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub r1: f64, // origin orbit radius (m)
    pub r2: f64, // target orbit radius (m)
    pub transfer_period: f64, // full period of the transfer ellipse (s)
    pub phase_angle: f64, // target lead over origin at launch (rad)
    pub launch_velocity: NVec2, // relative to the reference body (m/s)
}

impl TransferPlan {
    pub fn new(engine: &Engine, bodies: &TransferBodies) -> SimResult<Self> {
        let reference = require(engine, &bodies.reference)?;
        let origin = require(engine, &bodies.origin)?;
        let target = require(engine, &bodies.target)?;

        let mu = engine.g() * reference.m;
        let r1 = (origin.x - reference.x).norm();
        let r2 = (target.x - reference.x).norm();

        let transfer_period = transfer_period(semi_major_axis(r1, r2), mu);
        let target_period = circular_period(target, reference)
            .ok_or_else(|| SimError::NotOrbiting(target.name.clone()))?;

        let origin_v = origin.v - reference.v;
        if origin_v.norm() == 0.0 {
            return Err(SimError::NotOrbiting(origin.name.clone()));
        }

        Ok(Self {
            r1,
            r2,
            transfer_period,
            phase_angle: phase_angle(transfer_period, target_period),
            launch_velocity: transfer_velocity(mu, r1, r2, origin_v),
        })
    }

    /// Time of flight to the target: half the transfer ellipse
    pub fn flight_time(&self) -> f64 {
        0.5 * self.transfer_period
    }
}

/// Result of flying one probe through a transfer window
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    pub launch_angle: f64, // target lead over the probe at injection (rad)
    pub launched_at: f64, // seconds waited before injection
    pub window_steps: u64, // steps flown after injection
    pub closest_approach: f64, // smallest probe-target distance seen (m)
}

/// Settings for [`launch_probe`]
#[derive(Debug, Clone)]
pub struct ProbeLaunch {
    pub name: String,
    pub mass: f64,
    pub launch_angle: f64, // desired target lead at injection (rad)
    pub max_wait_steps: u64,
}

impl ProbeLaunch {
    pub fn new(launch_angle: f64, max_wait_steps: u64) -> Self {
        Self {
            name: "Probe".to_string(),
            mass: 10_000.0,
            launch_angle,
            max_wait_steps,
        }
    }
}

/// Wait for the launch geometry, inject a probe, and fly it for one transfer period
///
/// The probe starts at the point of the origin's orbit diametrically opposite
/// the origin, moving with the mirrored transfer velocity, so the origin's
/// own gravity does not disturb the launch. Injection happens once the target
/// leads that point by `launch.launch_angle`; if that does not happen within
/// `launch.max_wait_steps` steps the result is `None` and no probe is added.
///
/// After injection the engine runs for `ceil(transfer_period / dt)` steps,
/// tracking the closest approach between probe and target
pub fn launch_probe(
    engine: &mut Engine,
    bodies: &TransferBodies,
    launch: &ProbeLaunch,
) -> SimResult<Option<TransferOutcome>> {
    let desired = wrap_two_pi(launch.launch_angle + PI);

    // Wait for the phase error to cross zero; a jump across +-pi is the wrap,
    // not a crossing
    let mut prev = phase_error(engine, bodies, desired)?;
    let mut waited = 0;
    while prev != 0.0 {
        if waited == launch.max_wait_steps {
            log::info!(
                "no launch window for {:.2} deg within {} steps",
                launch.launch_angle.to_degrees(),
                launch.max_wait_steps
            );
            return Ok(None);
        }
        engine.advance_one_step();
        waited += 1;

        let err = phase_error(engine, bodies, desired)?;
        if err == 0.0 || (err.signum() != prev.signum() && (err - prev).abs() < PI) {
            break;
        }
        prev = err;
    }
    let launched_at = waited as f64 * engine.timestep();
    log::debug!("launch window reached after {waited} steps");

    let plan = TransferPlan::new(engine, bodies)?;
    let reference = require(engine, &bodies.reference)?;
    let origin = require(engine, &bodies.origin)?;

    let x = reference.x - (origin.x - reference.x);
    let v = reference.v - plan.launch_velocity;
    let launch_angle = wrap_pi(
        polar_angle(require(engine, &bodies.target)?, reference)
            - polar_angle(origin, reference)
            - PI,
    );

    let probe = Body::new(&launch.name, launch.mass, x, v, 1.0, "green")?;
    engine.append(probe)?;
    let probe_index = engine.bodies().len() - 1;
    let target_index = engine
        .index_of(&bodies.target)
        .ok_or_else(|| SimError::MissingBody(bodies.target.clone()))?;

    let window_steps = (plan.transfer_period / engine.timestep()).ceil() as u64;
    let mut closest_approach = f64::INFINITY;
    for _ in 0..window_steps {
        engine.advance_one_step();
        let b = engine.bodies();
        let distance = (b[target_index].x - b[probe_index].x).norm();
        closest_approach = closest_approach.min(distance);
    }

    log::info!(
        "probe launched at {:.2} deg came within {:.0} km of {}",
        launch_angle.to_degrees(),
        closest_approach / 1000.0,
        bodies.target
    );

    Ok(Some(TransferOutcome {
        launch_angle,
        launched_at,
        window_steps,
        closest_approach,
    }))
}
