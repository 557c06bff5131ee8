use std::path::PathBuf;

use approx::assert_relative_eq;

use solarsim::{read_body_records, Beeman, Engine, IntegratorConfig, Parameters, Scenario, ScenarioConfig, SimError};

const BODIES: &str = "\
# name, mass, x, y, vx, vy, radius, color
Sun, 1.989e30, 0.0, 0.0, 0.0, 0.0, 10, yellow
Earth,5.972e24,1.496e11,0,0,29784,3,blue
  Mars , 6.417e23, 2.2794e11, -1.5e9, 12.5, 24130.0, 2.5, red
";

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

#[test]
fn records_parse_in_file_order() {
    let records = read_body_records(BODIES.as_bytes()).unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Sun", "Earth", "Mars"]);

    let mars = &records[2];
    assert_eq!(mars.mass, 6.417e23);
    assert_eq!(mars.y, -1.5e9);
    assert_eq!(mars.vx, 12.5);
    assert_eq!(mars.color, "red");
}

#[test]
fn lookup_matches_input_record() {
    let records = read_body_records(BODIES.as_bytes()).unwrap();
    let engine = Engine::from_records(Parameters::default(), Box::new(Beeman), records.clone()).unwrap();

    for record in &records {
        let body = engine.lookup(&record.name).unwrap();
        assert_eq!(body.m, record.mass);
        assert_eq!(body.x.x, record.x);
        assert_eq!(body.x.y, record.y);
        assert_eq!(body.v.x, record.vx);
        assert_eq!(body.v.y, record.vy);
        assert_eq!(body.radius, record.radius);
        assert_eq!(body.color, record.color);
    }
    assert_eq!(engine.bodies()[1].name, "Earth");
}

#[test]
fn missing_column_is_fatal() {
    let short = "Sun, 1.989e30, 0.0, 0.0, 0.0, 0.0, 10\n";
    assert!(matches!(read_body_records(short.as_bytes()), Err(SimError::Csv(_))));
}

#[test]
fn malformed_number_is_fatal() {
    let bad = "Sun, heavy, 0.0, 0.0, 0.0, 0.0, 10, yellow\n";
    assert!(matches!(read_body_records(bad.as_bytes()), Err(SimError::Csv(_))));
}

#[test]
fn non_positive_mass_is_fatal() {
    let records = read_body_records("Void, 0.0, 1, 1, 0, 0, 1, black\n".as_bytes()).unwrap();
    let err = Engine::from_records(Parameters::default(), Box::new(Beeman), records).unwrap_err();

    match err {
        SimError::NonPositiveMass { name, mass } => {
            assert_eq!(name, "Void");
            assert_eq!(mass, 0.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn yaml_scenario_with_inline_bodies() {
    let yaml = r#"
engine:
  integrator: "euler"
parameters:
  timestep: 60.0
bodies:
  - name: "Star"
    mass: 2.0e30
    x: [ 0.0, 0.0 ]
    v: [ 0.0, 0.0 ]
  - name: "Rock"
    mass: 1.0e20
    x: [ 1.0e11, 0.0 ]
    v: [ 0.0, 3.0e4 ]
    radius: 0.5
    color: "grey"
  - name: "Dust"
    mass: 1.0
    x: [ 2.0e11, 0.0 ]
    v: [ 0.0, 2.0e4 ]
exclude: [ "Dust" ]
"#;
    let cfg = ScenarioConfig::from_reader(yaml.as_bytes()).unwrap();
    assert_eq!(cfg.engine.integrator, IntegratorConfig::Euler);
    assert_relative_eq!(cfg.parameters.g, 6.6743e-11);

    let scenario = Scenario::build_scenario(cfg).unwrap();
    assert_eq!(scenario.bodies.len(), 2);
    assert_eq!(scenario.bodies[1].color, "grey");
    assert_eq!(scenario.bodies[0].color, "white");

    let engine = scenario.into_engine().unwrap();
    assert_eq!(engine.integrator_name(), "euler");
    assert_eq!(engine.timestep(), 60.0);
    assert!(engine.lookup("Dust").is_none());
}

#[test]
fn unknown_exclude_name_is_fatal() {
    let yaml = r#"
bodies:
  - name: "Star"
    mass: 2.0e30
    x: [ 0.0, 0.0 ]
    v: [ 0.0, 0.0 ]
exclude: [ "Stra" ]
"#;
    let cfg = ScenarioConfig::from_reader(yaml.as_bytes()).unwrap();
    let err = Scenario::build_scenario(cfg).unwrap_err();
    assert!(matches!(err, SimError::MissingBody(n) if n == "Stra"));
}

#[test]
fn exclude_drops_only_the_named_body() {
    let cfg = ScenarioConfig::load(&scenario_path("solar_system.yaml")).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    let scenario = scenario.exclude("Venus").unwrap();
    let names: Vec<&str> = scenario.bodies.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Sun", "Mercury", "Earth", "Mars", "Jupiter"]);

    assert!(matches!(scenario.exclude("Venus"), Err(SimError::MissingBody(n)) if n == "Venus"));
}

#[test]
fn yaml_rejects_bad_vectors() {
    let yaml = r#"
bodies:
  - name: "Flat"
    mass: 1.0
    x: [ 0.0, 0.0, 0.0 ]
    v: [ 0.0, 0.0 ]
"#;
    assert!(matches!(ScenarioConfig::from_reader(yaml.as_bytes()), Err(SimError::Yaml(_))));
}

#[test]
fn shipped_solar_system_loads() {
    let cfg = ScenarioConfig::load(&scenario_path("solar_system.yaml")).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    let names: Vec<&str> = scenario.bodies.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter"]);
    assert_eq!(scenario.parameters.timestep, 100_000.0);
    assert_eq!(scenario.integrator, IntegratorConfig::Beeman);

    let without = scenario.without_outermost();
    assert_eq!(without.bodies.last().unwrap().name, "Mars");
}

#[test]
fn shipped_inner_planets_excludes_jupiter() {
    let cfg = ScenarioConfig::load(&scenario_path("inner_planets.yaml")).unwrap();
    let engine = Scenario::build_scenario(cfg).unwrap().into_engine().unwrap();

    assert_eq!(engine.bodies().len(), 5);
    assert!(engine.lookup("Jupiter").is_none());
    assert_eq!(engine.timestep(), 1000.0);
}

#[test]
fn missing_scenario_file_is_io_error() {
    let err = ScenarioConfig::load(&scenario_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
