//! Text and JSON reports of an ephemeris.

use std::fmt::Write;

use orrery_orbit::{BodyState, Ephemeris, OrbitPath};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    focus: Option<&'a str>,
    orbit_path_points: usize,
    #[serde(flatten)]
    ephemeris: &'a Ephemeris,
}

/// Pretty-printed JSON of the ephemeris, the focused body and path size.
pub fn render_json(
    ephemeris: &Ephemeris,
    focus: Option<&BodyState>,
    paths: &[OrbitPath],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        focus: focus.map(|state| state.name.as_str()),
        orbit_path_points: total_points(paths),
        ephemeris,
    })
}

/// Fixed-width table of every body, followed by the summary line.
pub fn render_table(
    ephemeris: &Ephemeris,
    focus: Option<&BodyState>,
    paths: &[OrbitPath],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Epoch + {:.2} days", ephemeris.elapsed_days);
    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "body", "x (AU)", "y (AU)", "z (AU)", "origin", "parent", "period (d)"
    );

    for state in &ephemeris.states {
        let period = state
            .orbital_period_days
            .map_or_else(|| "-".to_string(), |p| format!("{p:.3}"));
        let _ = writeln!(
            out,
            "{:<10} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>12}",
            state.name,
            state.position.x,
            state.position.y,
            state.position.z,
            state.distance_from_origin,
            state.distance_from_parent,
            period
        );
    }

    let _ = writeln!(out, "{}", ephemeris.summary);
    let _ = writeln!(
        out,
        "Orbit paths: {} ({} points)",
        paths.len(),
        total_points(paths)
    );
    if let Some(state) = focus {
        let _ = write!(
            out,
            "Focus: {} at ({:.4}, {:.4}, {:.4}) AU",
            state.name, state.position.x, state.position.y, state.position.z
        );
    }
    out
}

fn total_points(paths: &[OrbitPath]) -> usize {
    paths.iter().map(|path| path.points.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_orbit::{BodyCatalog, evaluate_all, orbit_paths};

    #[test]
    fn test_table_lists_every_body() {
        let catalog = BodyCatalog::solar_system().unwrap();
        let ephemeris = evaluate_all(&catalog, 100.0);
        let paths = orbit_paths(&catalog, 8);
        let table = render_table(&ephemeris, ephemeris.state("Earth"), &paths);

        for body in catalog.bodies() {
            assert!(table.contains(&body.name), "missing {}", body.name);
        }
        assert!(table.starts_with("Epoch + 100.00 days"));
        assert!(table.contains("Fastest orbit: Moon, farthest body: Neptune"));
        assert!(table.contains("Orbit paths: 9 (81 points)"));
        assert!(table.contains("Focus: Earth"));
    }

    #[test]
    fn test_json_round_trips_through_value() {
        let catalog = BodyCatalog::solar_system().unwrap();
        let ephemeris = evaluate_all(&catalog, 0.0);
        let json = render_json(&ephemeris, ephemeris.state("Sun"), &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["focus"], "Sun");
        assert_eq!(value["summary"]["farthest_body"], "Neptune");
        assert_eq!(value["states"].as_array().unwrap().len(), catalog.len());
        assert!(value["states"][0]["orbital_period_days"].is_null());
    }
}
