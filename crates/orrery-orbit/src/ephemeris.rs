//! Absolute positions for every body in a catalog at one instant.

use std::fmt;

use glam::DVec3;
use serde::Serialize;

use crate::catalog::BodyCatalog;
use crate::kepler::KeplerSolver;
use crate::transform::{OrbitalState, evaluate_with};

/// Derived state of one body, rebuilt on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyState {
    pub name: String,
    /// Position relative to the origin, AU.
    pub position: DVec3,
    /// Position relative to the parent (or the origin for parentless orbits), AU.
    pub relative_position: DVec3,
    /// `None` for stationary bodies and degenerate orbits.
    pub orbital_period_days: Option<f64>,
    pub distance_from_origin: f64,
    pub distance_from_parent: f64,
    /// Radians; zero for stationary bodies.
    pub true_anomaly: f64,
}

impl BodyState {
    fn stationary(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: DVec3::ZERO,
            relative_position: DVec3::ZERO,
            orbital_period_days: None,
            distance_from_origin: 0.0,
            distance_from_parent: 0.0,
            true_anomaly: 0.0,
        }
    }

    fn orbiting(name: &str, parent_position: DVec3, orbital: &OrbitalState) -> Self {
        let position = parent_position + orbital.position;
        Self {
            name: name.to_string(),
            position,
            relative_position: orbital.position,
            orbital_period_days: orbital.orbital_period_days,
            distance_from_origin: position.length(),
            distance_from_parent: orbital.position.length(),
            true_anomaly: orbital.true_anomaly,
        }
    }
}

/// Headline statistics over one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EphemerisSummary {
    /// Body with the shortest defined orbital period.
    pub fastest_orbiter: Option<String>,
    /// Body farthest from the origin.
    pub farthest_body: Option<String>,
}

impl EphemerisSummary {
    /// Label shown when no body qualifies.
    pub const NONE_LABEL: &'static str = "-";

    /// Fold `states` (in order, first wins ties) into a summary.
    pub fn from_states(states: &[BodyState]) -> Self {
        let (fastest, farthest) = states.iter().fold(
            (None::<(&BodyState, f64)>, None::<&BodyState>),
            |(fastest, farthest), state| {
                let fastest = match state.orbital_period_days {
                    Some(period)
                        if period > 0.0 && fastest.is_none_or(|(_, best)| period < best) =>
                    {
                        Some((state, period))
                    }
                    _ => fastest,
                };
                let farthest = match farthest {
                    Some(best) if state.distance_from_origin <= best.distance_from_origin => {
                        Some(best)
                    }
                    _ => Some(state),
                };
                (fastest, farthest)
            },
        );

        Self {
            fastest_orbiter: fastest.map(|(state, _)| state.name.clone()),
            farthest_body: farthest.map(|state| state.name.clone()),
        }
    }

    pub fn fastest_label(&self) -> &str {
        self.fastest_orbiter.as_deref().unwrap_or(Self::NONE_LABEL)
    }

    pub fn farthest_label(&self) -> &str {
        self.farthest_body.as_deref().unwrap_or(Self::NONE_LABEL)
    }
}

impl fmt::Display for EphemerisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fastest orbit: {}, farthest body: {}",
            self.fastest_label(),
            self.farthest_label()
        )
    }
}

/// States of every catalog body, in authored order, plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ephemeris {
    pub elapsed_days: f64,
    pub states: Vec<BodyState>,
    pub summary: EphemerisSummary,
}

impl Ephemeris {
    /// State of the body called `name`.
    pub fn state(&self, name: &str) -> Option<&BodyState> {
        self.states.iter().find(|state| state.name == name)
    }
}

/// Evaluate every body in `catalog` after `elapsed_days`.
pub fn evaluate_all(catalog: &BodyCatalog, elapsed_days: f64) -> Ephemeris {
    evaluate_all_with(catalog, elapsed_days, &KeplerSolver::default())
}

/// [`evaluate_all`] with an explicit Kepler solver.
///
/// Bodies are visited in the catalog's parent-first order, so every parent is
/// positioned before its children; the result is reported in authored order.
pub fn evaluate_all_with(
    catalog: &BodyCatalog,
    elapsed_days: f64,
    solver: &KeplerSolver,
) -> Ephemeris {
    let bodies = catalog.bodies();
    let mut states: Vec<Option<BodyState>> = vec![None; bodies.len()];

    for &i in catalog.evaluation_order() {
        let body = &bodies[i];
        let state = match &body.orbit {
            None => BodyState::stationary(&body.name),
            Some(orbit) => {
                let parent_position = catalog
                    .parent_index(i)
                    .and_then(|p| states[p].as_ref())
                    .map_or(DVec3::ZERO, |parent| parent.position);
                let orbital = evaluate_with(orbit, elapsed_days, solver);
                BodyState::orbiting(&body.name, parent_position, &orbital)
            }
        };
        states[i] = Some(state);
    }

    let states: Vec<BodyState> = states.into_iter().flatten().collect();
    let summary = EphemerisSummary::from_states(&states);

    Ephemeris {
        elapsed_days,
        states,
        summary,
    }
}
