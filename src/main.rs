use solarsim::analysis::{alignment, energy, energy::EnergyTrace, hohmann, orbit};
use solarsim::{IntegratorConfig, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solarsim", about = "Fixed-step Newtonian solar-system experiments")]
struct Args {
    /// Scenario YAML; bare names are looked up under `scenarios/`.
    /// Defaults to `inner_planets.yaml` for `hohmann`, `solar_system.yaml` otherwise
    #[arg(short, long, global = true)]
    file_name: Option<String>,

    /// Override the scenario's integrator
    #[arg(long, value_enum, global = true)]
    integrator: Option<IntegratorConfig>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Step the scenario and print the final state of every body
    Run {
        #[arg(long, default_value_t = 1000)]
        steps: u64,
    },

    /// Track total energy over a run
    Energy {
        /// Defaults to 500 steps for Beeman and 5000 for Euler
        #[arg(long)]
        steps: Option<u64>,
    },

    /// Orbital periods relative to Earth's
    Periods {
        #[arg(long, default_value = "Sun")]
        reference: String,
        #[arg(long, default_value = "Earth")]
        unit: String,
    },

    /// Years until the planets line up again within each threshold
    Alignment {
        /// Thresholds in degrees
        #[arg(long, num_args = 1.., default_values_t = [60.0])]
        threshold: Vec<f64>,
        #[arg(long, default_value_t = 2_000_000)]
        max_steps: u64,
    },

    /// Plan an Earth to Mars Hohmann transfer, optionally flying probes
    Hohmann {
        /// Launch angles in degrees to fly a probe at
        #[arg(long, num_args = 0..)]
        angle: Vec<f64>,
        /// Override the scenario's step size (s)
        #[arg(long)]
        timestep: Option<f64>,
        /// Origin orbits to run before waiting for the launch window
        #[arg(long, default_value_t = 2.0)]
        warmup_orbits: f64,
        #[arg(long, default_value_t = 200_000)]
        max_wait_steps: u64,
    },
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let file_name = match (&args.file_name, &args.command) {
        (Some(name), _) => name.as_str(),
        (None, Command::Hohmann { .. }) => "inner_planets.yaml",
        (None, _) => "solar_system.yaml",
    };
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("scenarios")
            .join(file_name)
    };

    let cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    let mut scenario = Scenario::build_scenario(cfg)?;
    if let Some(integrator) = args.integrator {
        scenario = scenario.with_integrator(integrator);
    }
    Ok(scenario)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let scenario = load_scenario(&args)?;

    match &args.command {
        Command::Run { steps } => {
            let mut engine = scenario.into_engine()?;
            engine.advance(*steps);
            println!("t = {:.0} s", engine.elapsed());
            for b in engine.bodies() {
                println!(
                    "{:>10}  x = ({:+.4e}, {:+.4e}) m  v = ({:+.4e}, {:+.4e}) m/s",
                    b.name, b.x.x, b.x.y, b.v.x, b.v.y
                );
            }
        }

        Command::Energy { steps } => {
            let steps = steps.unwrap_or_else(|| energy::default_trace_steps(scenario.integrator));
            let mut engine = scenario.into_engine()?;
            let trace = EnergyTrace::record(&mut engine, steps);
            let first = trace.energies.first().copied().unwrap_or_default();
            let last = trace.energies.last().copied().unwrap_or_default();
            println!("integrator: {}", engine.integrator_name());
            println!("initial energy: {first:.6e} J");
            println!("final energy:   {last:.6e} J");
            println!("max relative drift: {:.3e}", trace.drift());
        }

        Command::Periods { reference, unit } => {
            let engine = scenario.into_engine()?;
            for (name, ratio) in orbit::relative_periods(&engine, reference, unit)? {
                println!("{unit} 1 year = {name} {ratio:.2} years");
            }
        }

        Command::Alignment { threshold, max_steps } => {
            for &degrees in threshold {
                let mut engine = scenario.clone().into_engine()?;
                let year = year_of(&engine, "Sun", "Earth")?;
                match alignment::time_to_realign(
                    &mut engine,
                    "Sun",
                    degrees.to_radians(),
                    *max_steps,
                )? {
                    Some(t) => println!(
                        "The planets aligned within {degrees} degrees after {:.3} years",
                        t / year
                    ),
                    None => println!(
                        "No alignment within {degrees} degrees after {max_steps} steps"
                    ),
                }
            }
        }

        Command::Hohmann {
            angle,
            timestep,
            warmup_orbits,
            max_wait_steps,
        } => {
            let scenario = match timestep {
                Some(dt) => scenario.with_timestep(*dt),
                None => scenario,
            };
            let bodies = hohmann::TransferBodies::new("Sun", "Earth", "Mars");

            let engine = scenario.clone().into_engine()?;
            let plan = hohmann::TransferPlan::new(&engine, &bodies)?;
            println!("Ideal launch angle: {:.3} deg", plan.phase_angle.to_degrees());
            println!(
                "Initial velocity needed: {:.3} km/s",
                plan.launch_velocity.norm() / 1000.0
            );
            println!(
                "Orbital period of the transfer ellipse: {:.1} days",
                plan.transfer_period / 86_400.0
            );

            for &degrees in angle {
                let mut engine = scenario.clone().into_engine()?;
                let warmup = warmup_orbits * year_of(&engine, "Sun", "Earth")?;
                engine.advance((warmup / engine.timestep()).ceil() as u64);

                let launch = hohmann::ProbeLaunch::new(degrees.to_radians(), *max_wait_steps);
                match hohmann::launch_probe(&mut engine, &bodies, &launch)? {
                    Some(outcome) => println!(
                        "{:.2} deg: closest approach to Mars {:.0} km",
                        outcome.launch_angle.to_degrees(),
                        outcome.closest_approach / 1000.0
                    ),
                    None => println!("{degrees:.2} deg: no launch window found"),
                }
            }
        }
    }

    Ok(())
}

fn year_of(engine: &solarsim::Engine, reference: &str, body: &str) -> Result<f64> {
    let reference = engine
        .lookup(reference)
        .with_context(|| format!("scenario has no `{reference}`"))?;
    let body = engine
        .lookup(body)
        .with_context(|| format!("scenario has no `{body}`"))?;
    orbit::circular_period(body, reference)
        .with_context(|| format!("`{}` is not orbiting `{}`", body.name, reference.name))
}
