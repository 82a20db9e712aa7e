//! End-to-end checks of the clock, catalog and ephemeris working together.

use glam::DVec3;
use orrery_orbit::{
    Body, BodyCatalog, OrbitalElements, SimulationClock, evaluate, evaluate_all, tessellate,
};

#[test]
fn test_unit_orbit_end_to_end() {
    let catalog = BodyCatalog::new(vec![
        Body::stationary("Sun").as_light_source(),
        Body::orbiting("Earthlike", OrbitalElements::circular(1.0).around("Sun")),
    ])
    .unwrap();

    let at_epoch = evaluate_all(&catalog, 0.0);
    let body = at_epoch.state("Earthlike").unwrap();
    assert!((body.relative_position - DVec3::X).length() < 1e-12);
    let period = body.orbital_period_days.unwrap();
    assert!((period - 365.25).abs() < 0.01);

    let quarter = evaluate_all(&catalog, period / 4.0);
    let body = quarter.state("Earthlike").unwrap();
    assert!((body.position - DVec3::Y).length() < 1e-9);
}

#[test]
fn test_clock_drives_ephemeris() {
    let catalog = BodyCatalog::solar_system().unwrap();
    let mut clock = SimulationClock::new();

    let mut days = 0.0;
    for _ in 0..60 {
        days = clock.advance(1.0 / 60.0, 50.0, false);
    }
    assert!((days - 50.0).abs() < 1e-9);

    let ephemeris = evaluate_all(&catalog, days);
    assert_eq!(ephemeris.states.len(), catalog.len());
    assert!((ephemeris.elapsed_days - days).abs() < f64::EPSILON);
}

#[test]
fn test_every_state_composes_on_its_parent() {
    let catalog = BodyCatalog::solar_system().unwrap();
    for days in [0.0, 12.5, 4000.0, -300.0] {
        let ephemeris = evaluate_all(&catalog, days);
        for (body, state) in catalog.bodies().iter().zip(&ephemeris.states) {
            assert_eq!(body.name, state.name);
            match &body.orbit {
                None => assert_eq!(state.position, DVec3::ZERO),
                Some(orbit) => {
                    let parent = body
                        .parent()
                        .and_then(|name| ephemeris.state(name))
                        .map_or(DVec3::ZERO, |parent| parent.position);
                    let relative = evaluate(orbit, days).position;
                    assert!((state.position - (parent + relative)).length() < 1e-12);
                }
            }
        }
    }
}

#[test]
fn test_solar_system_summary() {
    let catalog = BodyCatalog::solar_system().unwrap();
    let ephemeris = evaluate_all(&catalog, 0.0);
    assert_eq!(ephemeris.summary.fastest_label(), "Moon");
    assert_eq!(ephemeris.summary.farthest_label(), "Neptune");

    let moon = ephemeris.state("Moon").unwrap();
    let earth = ephemeris.state("Earth").unwrap();
    assert!((moon.position - earth.position).length() < 0.003);
}

#[test]
fn test_catalog_paths_close() {
    let catalog = BodyCatalog::solar_system().unwrap();
    for body in catalog.bodies() {
        let Some(orbit) = &body.orbit else {
            assert!(body.is_light_source);
            continue;
        };
        let points = tessellate(orbit, 128);
        assert_eq!(points.len(), 129, "{}", body.name);
        assert_eq!(points[0], points[128], "{}", body.name);
    }
}
