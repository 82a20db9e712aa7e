//! Keplerian ephemeris core for the Orrery workspace.
//!
//! Turns authored orbital elements into per-frame body positions: a simulation
//! clock, a Kepler equation solver, the orbital-plane to parent-frame transform,
//! a validated body catalog, the ephemeris aggregator, and an orbit path
//! tessellator for display layers.

mod catalog;
mod clock;
mod elements;
mod ephemeris;
mod error;
mod kepler;
mod path;
mod transform;

pub use catalog::{Body, BodyCatalog};
pub use clock::{ClockControls, DEFAULT_DAYS_PER_SECOND, SimulationClock};
pub use elements::{GAUSSIAN_GM, GAUSSIAN_K, MAX_ECCENTRICITY, OrbitalElements};
pub use ephemeris::{BodyState, Ephemeris, EphemerisSummary, evaluate_all, evaluate_all_with};
pub use error::CatalogError;
pub use kepler::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, KeplerSolution, KeplerSolver, normalize_angle,
    solve_kepler,
};
pub use path::{DEFAULT_SEGMENTS, OrbitPath, OrbitPathCache, orbit_paths, tessellate, tessellate_with};
pub use transform::{OrbitalState, PerifocalBasis, evaluate, evaluate_with};
