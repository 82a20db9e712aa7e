//! Closed orbit polylines for display.
//!
//! Paths are time-independent and expressed in the parent's frame; a renderer
//! translates them onto the parent's current position each frame. They only
//! need rebuilding when the orbit definition changes, which
//! [`OrbitPathCache`] tracks.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec3;
use serde::Serialize;

use crate::catalog::{Body, BodyCatalog};
use crate::elements::OrbitalElements;
use crate::kepler::KeplerSolver;
use crate::transform::{PerifocalBasis, orbital_plane_point};

/// Segment count used for catalog orbit lines.
pub const DEFAULT_SEGMENTS: u32 = 256;

/// Sample one revolution of `elements` into `segment_count + 1` points, the
/// last equal to the first. Empty for degenerate orbits or zero segments.
pub fn tessellate(elements: &OrbitalElements, segment_count: u32) -> Vec<DVec3> {
    tessellate_with(elements, segment_count, &KeplerSolver::default())
}

/// [`tessellate`] with an explicit Kepler solver.
pub fn tessellate_with(
    elements: &OrbitalElements,
    segment_count: u32,
    solver: &KeplerSolver,
) -> Vec<DVec3> {
    if elements.is_degenerate() || segment_count == 0 {
        return Vec::new();
    }

    let basis = PerifocalBasis::from_elements(elements);
    let eccentricity = elements.effective_eccentricity();

    let mut points: Vec<DVec3> = (0..segment_count)
        .map(|k| {
            let mean_anomaly = TAU * f64::from(k) / f64::from(segment_count);
            let e_anom = solver.solve(mean_anomaly, eccentricity);
            let (plane, _, _) = orbital_plane_point(elements.semi_major_axis, eccentricity, e_anom);
            basis.to_parent_frame(plane)
        })
        .collect();

    // M = 2π lands on the same point as M = 0; reuse it so the loop closes exactly.
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Orbit line for one catalog body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    pub body: String,
    /// Frame the points are expressed in; `None` is the origin.
    pub parent: Option<String>,
    pub points: Vec<DVec3>,
}

/// Tessellate every orbiting body in `catalog`, in authored order.
pub fn orbit_paths(catalog: &BodyCatalog, segment_count: u32) -> Vec<OrbitPath> {
    catalog
        .bodies()
        .iter()
        .filter_map(|body| {
            let orbit = body.orbit.as_ref()?;
            Some(OrbitPath {
                body: body.name.clone(),
                parent: orbit.parent.clone(),
                points: tessellate(orbit, segment_count),
            })
        })
        .collect()
}

#[derive(Debug)]
struct CachedPath {
    elements: OrbitalElements,
    segment_count: u32,
    points: Vec<DVec3>,
}

/// Memoised orbit paths keyed by body name.
#[derive(Debug, Default)]
pub struct OrbitPathCache {
    entries: HashMap<String, CachedPath>,
    rebuilds: u64,
}

impl OrbitPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path for `body`, rebuilt only if its elements or the segment count
    /// changed since the last call. Stationary bodies have an empty path.
    pub fn path(&mut self, body: &Body, segment_count: u32) -> &[DVec3] {
        let Some(elements) = &body.orbit else {
            return &[];
        };

        let stale = self.entries.get(&body.name).is_none_or(|cached| {
            cached.segment_count != segment_count || &cached.elements != elements
        });
        if stale {
            log::debug!(
                "Tessellating orbit of `{}` with {segment_count} segments",
                body.name
            );
            self.rebuilds += 1;
            self.entries.insert(
                body.name.clone(),
                CachedPath {
                    elements: elements.clone(),
                    segment_count,
                    points: tessellate(elements, segment_count),
                },
            );
        }

        self.entries
            .get(&body.name)
            .map(|cached| cached.points.as_slice())
            .unwrap_or_default()
    }

    /// Drop entries for bodies no longer in `catalog`.
    pub fn retain_catalog(&mut self, catalog: &BodyCatalog) {
        self.entries
            .retain(|name, _| catalog.get(name).is_some_and(|body| body.orbit.is_some()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tessellations performed so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}
