//! Newton-Raphson solver for Kepler's equation `E - e·sin(E) = M`.

use std::f64::consts::{PI, TAU};

/// Iteration cap used by [`solve_kepler`].
pub const DEFAULT_MAX_ITERATIONS: u32 = 12;

/// Newton step magnitude below which [`solve_kepler`] stops.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Above this eccentricity the iteration starts from π instead of M, where the
/// plain guess converges slowly or overshoots.
const HIGH_ECCENTRICITY: f64 = 0.8;

/// Outcome of one solve, including whether the tolerance was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians.
    pub eccentric_anomaly: f64,
    /// Newton steps taken.
    pub iterations: u32,
    /// False when the iteration cap was hit before the step fell under tolerance.
    pub converged: bool,
}

/// Newton-Raphson iteration settings.
///
/// The default matches [`solve_kepler`]. Hitting the cap is not an error: the
/// best estimate is returned and `converged` reports the shortfall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl KeplerSolver {
    /// Eccentric anomaly for `mean_anomaly` (radians) and `eccentricity`.
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> f64 {
        self.solve_detailed(mean_anomaly, eccentricity)
            .eccentric_anomaly
    }

    /// Like [`solve`](Self::solve) but reports iterations and convergence.
    pub fn solve_detailed(&self, mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
        let mut e_anom = if eccentricity > HIGH_ECCENTRICITY {
            PI
        } else {
            mean_anomaly
        };

        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.max_iterations {
            let residual = e_anom - eccentricity * e_anom.sin() - mean_anomaly;
            let derivative = 1.0 - eccentricity * e_anom.cos();
            let step = residual / derivative;
            e_anom -= step;
            iterations += 1;
            if step.abs() < self.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            log::trace!(
                "Kepler solve hit {iterations} iterations without converging (M={mean_anomaly}, e={eccentricity})"
            );
        }

        KeplerSolution {
            eccentric_anomaly: e_anom,
            iterations,
            converged,
        }
    }
}

/// Solve Kepler's equation with the default iteration cap and tolerance.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    KeplerSolver::default().solve(mean_anomaly, eccentricity)
}

/// Wrap an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(e_anom: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
        e_anom - eccentricity * e_anom.sin() - mean_anomaly
    }

    #[test]
    fn test_circular_returns_mean_anomaly() {
        for i in 0..64 {
            let m = TAU * i as f64 / 64.0;
            let e_anom = solve_kepler(m, 0.0);
            assert!((e_anom - m).abs() < 1e-12, "M={m}, E={e_anom}");
        }
    }

    #[test]
    fn test_residual_small_across_eccentricities() {
        for ei in 0..=19 {
            let e = ei as f64 * 0.05;
            for mi in 0..63 {
                let m = mi as f64 * 0.1;
                let e_anom = solve_kepler(m, e);
                let r = residual(e_anom, e, m);
                assert!(r.abs() < 1e-6, "e={e}, M={m}, residual={r}");
            }
        }
    }

    #[test]
    fn test_periapsis_and_apoapsis() {
        assert!(solve_kepler(0.0, 0.0167).abs() < 1e-10);
        assert!((solve_kepler(PI, 0.0167) - PI).abs() < 1e-10);
        assert!((solve_kepler(PI, 0.9) - PI).abs() < 1e-10);
    }

    #[test]
    fn test_detailed_reports_convergence() {
        let solution = KeplerSolver::default().solve_detailed(1.0, 0.3);
        assert!(solution.converged);
        assert!(solution.iterations <= DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_detailed_reports_cap_hit() {
        let solver = KeplerSolver {
            max_iterations: 1,
            tolerance: 1e-15,
        };
        let solution = solver.solve_detailed(0.5, 0.9);
        assert_eq!(solution.iterations, 1);
        assert!(!solution.converged);
        assert!(solution.eccentric_anomaly.is_finite());
    }

    #[test]
    fn test_normalize_angle_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
        let tiny = normalize_angle(-1e-18);
        assert!((0.0..TAU).contains(&tiny));
    }
}
