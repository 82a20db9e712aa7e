//! Keplerian state of a body relative to its parent frame.

use glam::{DVec2, DVec3};
use serde::Serialize;

use crate::elements::OrbitalElements;
use crate::kepler::{KeplerSolver, normalize_angle};

/// Orbital-plane axes expressed in the parent frame.
///
/// `u` points at periapsis, `v` is 90° ahead of it in the direction of motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerifocalBasis {
    pub u: DVec3,
    pub v: DVec3,
}

impl PerifocalBasis {
    /// Basis for the given inclination, ascending node and argument of
    /// periapsis, all in degrees.
    pub fn new(inclination: f64, longitude_ascending: f64, argument_periapsis: f64) -> Self {
        let (sin_i, cos_i) = inclination.to_radians().sin_cos();
        let (sin_o, cos_o) = longitude_ascending.to_radians().sin_cos();
        let (sin_w, cos_w) = argument_periapsis.to_radians().sin_cos();

        let u = DVec3::new(
            cos_o * cos_w - sin_o * sin_w * cos_i,
            sin_o * cos_w + cos_o * sin_w * cos_i,
            sin_w * sin_i,
        );
        let v = DVec3::new(
            -cos_o * sin_w - sin_o * cos_w * cos_i,
            -sin_o * sin_w + cos_o * cos_w * cos_i,
            cos_w * sin_i,
        );

        Self { u, v }
    }

    pub fn from_elements(elements: &OrbitalElements) -> Self {
        Self::new(
            elements.inclination,
            elements.longitude_of_ascending_node,
            elements.argument_of_periapsis,
        )
    }

    /// Rotate an orbital-plane point into the parent frame.
    pub fn to_parent_frame(&self, plane: DVec2) -> DVec3 {
        self.u * plane.x + self.v * plane.y
    }
}

/// Instantaneous state of an orbit, relative to the orbit's parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalState {
    /// Position in the parent frame, AU.
    pub position: DVec3,
    /// Distance from the focus, AU.
    pub radius_vector: f64,
    /// True anomaly, radians.
    pub true_anomaly: f64,
    /// Position in the orbital plane before rotation, AU.
    pub orbital_plane_position: DVec2,
    /// Period in simulated days, `None` for degenerate orbits.
    pub orbital_period_days: Option<f64>,
}

impl OrbitalState {
    /// State reported for orbits with a non-positive semi-major axis.
    pub const DEGENERATE: Self = Self {
        position: DVec3::ZERO,
        radius_vector: 0.0,
        true_anomaly: 0.0,
        orbital_plane_position: DVec2::ZERO,
        orbital_period_days: None,
    };
}

/// Evaluate `elements` after `elapsed_days` using the default solver.
pub fn evaluate(elements: &OrbitalElements, elapsed_days: f64) -> OrbitalState {
    evaluate_with(elements, elapsed_days, &KeplerSolver::default())
}

/// Evaluate `elements` after `elapsed_days` with an explicit solver.
pub fn evaluate_with(
    elements: &OrbitalElements,
    elapsed_days: f64,
    solver: &KeplerSolver,
) -> OrbitalState {
    let Some(mean_motion) = elements.mean_motion() else {
        return OrbitalState::DEGENERATE;
    };

    let eccentricity = elements.effective_eccentricity();
    let mean_anomaly =
        normalize_angle(elements.mean_anomaly_at_epoch_rad() + mean_motion * elapsed_days);
    let e_anom = solver.solve(mean_anomaly, eccentricity);

    let (plane, radius_vector, true_anomaly) =
        orbital_plane_point(elements.semi_major_axis, eccentricity, e_anom);
    let position = PerifocalBasis::from_elements(elements).to_parent_frame(plane);

    OrbitalState {
        position,
        radius_vector,
        true_anomaly,
        orbital_plane_position: plane,
        orbital_period_days: Some(std::f64::consts::TAU / mean_motion),
    }
}

/// Orbital-plane position, radius vector and true anomaly for an eccentric
/// anomaly `e_anom`.
pub(crate) fn orbital_plane_point(
    semi_major_axis: f64,
    eccentricity: f64,
    e_anom: f64,
) -> (DVec2, f64, f64) {
    let (sin_e, cos_e) = e_anom.sin_cos();
    let true_anomaly = ((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity);
    let radius_vector = semi_major_axis * (1.0 - eccentricity * cos_e);

    let plane = DVec2::new(
        radius_vector * true_anomaly.cos(),
        radius_vector * true_anomaly.sin(),
    );
    (plane, radius_vector, true_anomaly)
}
