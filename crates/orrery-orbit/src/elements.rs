//! Authored Keplerian orbital elements.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Gaussian gravitational constant k, in AU^(3/2) per day.
pub const GAUSSIAN_K: f64 = 0.017_202_098_95;

/// Gravitational parameter of the central mass (k²), in AU³/day².
pub const GAUSSIAN_GM: f64 = GAUSSIAN_K * GAUSSIAN_K;

/// Largest eccentricity the transform will evaluate. Open orbits are not
/// modelled, so anything at or beyond 1 is pulled back onto a closed ellipse.
pub const MAX_ECCENTRICITY: f64 = 1.0 - 1e-9;

/// Classical orbital elements of one body relative to its parent.
///
/// Lengths are in astronomical units, angles in degrees. Only the semi-major
/// axis is required in catalog files; every angle and the eccentricity default
/// to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis in AU. Non-positive values describe a degenerate orbit.
    pub semi_major_axis: f64,
    /// Eccentricity, expected in `[0, 1)`.
    #[serde(default)]
    pub eccentricity: f64,
    /// Inclination to the reference plane, degrees.
    #[serde(default)]
    pub inclination: f64,
    /// Longitude of the ascending node, degrees.
    #[serde(default)]
    pub longitude_of_ascending_node: f64,
    /// Argument of periapsis, degrees.
    #[serde(default)]
    pub argument_of_periapsis: f64,
    /// Mean anomaly at the simulation epoch, degrees.
    #[serde(default)]
    pub mean_anomaly_at_epoch: f64,
    /// Name of the body this orbit is centred on. `None` orbits the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl OrbitalElements {
    /// A circular, uninclined orbit of radius `semi_major_axis` around the origin.
    pub fn circular(semi_major_axis: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity: 0.0,
            inclination: 0.0,
            longitude_of_ascending_node: 0.0,
            argument_of_periapsis: 0.0,
            mean_anomaly_at_epoch: 0.0,
            parent: None,
        }
    }

    /// Returns the same orbit centred on `parent`.
    pub fn around(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// True when the semi-major axis cannot describe an orbit.
    pub fn is_degenerate(&self) -> bool {
        !(self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0)
    }

    /// Eccentricity clamped into the closed-ellipse range the solver handles.
    pub fn effective_eccentricity(&self) -> f64 {
        if self.eccentricity.is_nan() {
            return 0.0;
        }
        self.eccentricity.clamp(0.0, MAX_ECCENTRICITY)
    }

    /// Mean motion in radians per day, `None` for degenerate orbits.
    pub fn mean_motion(&self) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        Some((GAUSSIAN_GM / self.semi_major_axis.powi(3)).sqrt())
    }

    /// Orbital period in simulated days, `None` for degenerate orbits.
    pub fn orbital_period_days(&self) -> Option<f64> {
        self.mean_motion().map(|n| TAU / n)
    }

    /// Mean anomaly at epoch in radians.
    pub fn mean_anomaly_at_epoch_rad(&self) -> f64 {
        self.mean_anomaly_at_epoch.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_au_period_is_one_year() {
        let period = OrbitalElements::circular(1.0).orbital_period_days().unwrap();
        assert!((period - 365.25).abs() < 0.01, "period = {period}");
    }

    #[test]
    fn test_degenerate_axis_has_no_period() {
        for a in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let elements = OrbitalElements::circular(a);
            assert!(elements.is_degenerate(), "a = {a}");
            assert!(elements.orbital_period_days().is_none());
        }
    }

    #[test]
    fn test_effective_eccentricity_clamps() {
        let mut elements = OrbitalElements::circular(1.0);
        elements.eccentricity = 1.5;
        assert!(elements.effective_eccentricity() < 1.0);
        elements.eccentricity = -0.2;
        assert_eq!(elements.effective_eccentricity(), 0.0);
        elements.eccentricity = 0.3;
        assert_eq!(elements.effective_eccentricity(), 0.3);
    }

    #[test]
    fn test_missing_angles_default_to_zero() {
        let elements: OrbitalElements =
            ron::from_str("(semi_major_axis: 2.5, parent: Some(\"Sun\"))").unwrap();
        assert_eq!(elements.semi_major_axis, 2.5);
        assert_eq!(elements.eccentricity, 0.0);
        assert_eq!(elements.inclination, 0.0);
        assert_eq!(elements.parent.as_deref(), Some("Sun"));
    }
}
