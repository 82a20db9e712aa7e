//! Authored bodies and the validated catalog they are evaluated from.
//!
//! A [`BodyCatalog`] is built once from configuration and is immutable
//! afterwards. Building it checks names, parent references and colors, and
//! resolves a parent-first evaluation order so the ephemeris never looks up a
//! parent that has not been positioned yet.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::OrbitalElements;
use crate::error::CatalogError;

/// Built-in catalog: the Sun, the eight planets and the Moon at J2000.
const SOLAR_SYSTEM_RON: &str = include_str!("../assets/solar_system.ron");

/// One celestial body as authored in a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Unique identifier, also used as the display label.
    pub name: String,
    /// Display radius in scene units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Display color as `#rrggbb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Whether the body emits light (the central star).
    #[serde(default)]
    pub is_light_source: bool,
    /// Whether the body can be picked as a camera target.
    #[serde(default = "default_focusable")]
    pub focusable: bool,
    /// Orbit around the parent; `None` pins the body to the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitalElements>,
}

fn default_focusable() -> bool {
    true
}

impl Body {
    /// A body fixed at the origin.
    pub fn stationary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            radius: None,
            color: None,
            is_light_source: false,
            focusable: true,
            orbit: None,
        }
    }

    /// A body following `orbit`.
    pub fn orbiting(name: impl Into<String>, orbit: OrbitalElements) -> Self {
        Self {
            orbit: Some(orbit),
            ..Self::stationary(name)
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn as_light_source(mut self) -> Self {
        self.is_light_source = true;
        self
    }

    /// Name of the parent body, if this body orbits one.
    pub fn parent(&self) -> Option<&str> {
        self.orbit.as_ref().and_then(|orbit| orbit.parent.as_deref())
    }

    /// Display color as RGB bytes, `None` when unset or malformed.
    pub fn color_rgb(&self) -> Option<[u8; 3]> {
        self.color.as_deref().and_then(parse_hex_color)
    }
}

fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Validated, immutable set of bodies.
#[derive(Debug, Clone)]
pub struct BodyCatalog {
    bodies: Vec<Body>,
    parents: Vec<Option<usize>>,
    order: Vec<usize>,
    index: HashMap<String, usize>,
}

impl BodyCatalog {
    /// Validate `bodies` and resolve their evaluation order.
    ///
    /// # Errors
    ///
    /// Rejects empty or duplicate names, unknown parents, parent cycles and
    /// malformed colors.
    pub fn new(bodies: Vec<Body>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if body.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { index: i });
            }
            if index.insert(body.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateName(body.name.clone()));
            }
            if let Some(color) = &body.color
                && parse_hex_color(color).is_none()
            {
                return Err(CatalogError::InvalidColor {
                    body: body.name.clone(),
                    color: color.clone(),
                });
            }
            if let Some(orbit) = &body.orbit
                && !(0.0..1.0).contains(&orbit.eccentricity)
            {
                log::warn!(
                    "Body `{}` has eccentricity {} outside [0, 1); it will be clamped",
                    body.name,
                    orbit.eccentricity
                );
            }
        }

        let parents = bodies
            .iter()
            .map(|body| match body.parent() {
                None => Ok(None),
                Some(parent) => index.get(parent).copied().map(Some).ok_or_else(|| {
                    CatalogError::UnknownParent {
                        body: body.name.clone(),
                        parent: parent.to_string(),
                    }
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let order = parent_first_order(&parents);
        if order.len() != bodies.len() {
            let mut visited = vec![false; bodies.len()];
            for &i in &order {
                visited[i] = true;
            }
            let stuck = visited.iter().position(|seen| !seen).unwrap_or_default();
            return Err(CatalogError::ParentCycle(bodies[stuck].name.clone()));
        }

        log::debug!("Catalog validated with {} bodies", bodies.len());
        Ok(Self {
            bodies,
            parents,
            order,
            index,
        })
    }

    /// Parse a RON list of bodies.
    pub fn from_ron_str(contents: &str) -> Result<Self, CatalogError> {
        let bodies: Vec<Body> = ron::from_str(contents).map_err(CatalogError::ParseError)?;
        Self::new(bodies)
    }

    /// Load a RON catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(CatalogError::ReadError)?;
        let catalog = Self::from_ron_str(&contents)?;
        log::info!(
            "Loaded {} bodies from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The built-in solar system catalog.
    pub fn solar_system() -> Result<Self, CatalogError> {
        Self::from_ron_str(SOLAR_SYSTEM_RON)
    }

    /// Bodies in authored order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The body `name` orbits, if any.
    pub fn parent_of(&self, name: &str) -> Option<&Body> {
        let i = self.index_of(name)?;
        self.parents[i].map(|p| &self.bodies[p])
    }

    pub(crate) fn parent_index(&self, i: usize) -> Option<usize> {
        self.parents[i]
    }

    /// Indices into [`bodies`](Self::bodies), every parent before its children.
    pub fn evaluation_order(&self) -> &[usize] {
        &self.order
    }

    /// Names of bodies that can be chosen as a camera target.
    pub fn focusable(&self) -> impl Iterator<Item = &str> {
        self.bodies
            .iter()
            .filter(|body| body.focusable)
            .map(|body| body.name.as_str())
    }

    pub fn light_sources(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|body| body.is_light_source)
    }
}

/// Depth-first from every root, children in authored order. Bodies that
/// cannot reach a root are left out.
fn parent_first_order(parents: &[Option<usize>]) -> Vec<usize> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
    for (child, parent) in parents.iter().enumerate() {
        if let Some(parent) = parent {
            children[*parent].push(child);
        }
    }

    let mut order = Vec::with_capacity(parents.len());
    let mut stack: Vec<usize> = parents
        .iter()
        .enumerate()
        .filter(|(_, parent)| parent.is_none())
        .map(|(i, _)| i)
        .rev()
        .collect();

    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().rev());
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str, a: f64, parent: &str) -> Body {
        Body::orbiting(name, OrbitalElements::circular(a).around(parent))
    }

    #[test]
    fn test_parents_precede_children() {
        let catalog = BodyCatalog::new(vec![
            planet("Moon", 0.1, "Earth"),
            planet("Earth", 1.0, "Sun"),
            Body::stationary("Sun"),
            planet("Mars", 1.5, "Sun"),
        ])
        .unwrap();

        let order = catalog.evaluation_order();
        let position = |name: &str| {
            let i = catalog.index_of(name).unwrap();
            order.iter().position(|&o| o == i).unwrap()
        };
        assert_eq!(order.len(), 4);
        assert!(position("Sun") < position("Earth"));
        assert!(position("Earth") < position("Moon"));
        assert!(position("Sun") < position("Mars"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = BodyCatalog::new(vec![Body::stationary("Sun"), Body::stationary("Sun")]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Sun"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = BodyCatalog::new(vec![Body::stationary("Sun"), Body::stationary("  ")]);
        assert!(matches!(result, Err(CatalogError::EmptyName { index: 1 })));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let result = BodyCatalog::new(vec![planet("Moon", 0.1, "Earth")]);
        assert!(matches!(
            result,
            Err(CatalogError::UnknownParent { body, parent }) if body == "Moon" && parent == "Earth"
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let result = BodyCatalog::new(vec![
            Body::stationary("Sun"),
            planet("A", 1.0, "B"),
            planet("B", 1.0, "A"),
        ]);
        assert!(matches!(result, Err(CatalogError::ParentCycle(name)) if name == "A"));

        let result = BodyCatalog::new(vec![planet("Self", 1.0, "Self")]);
        assert!(matches!(result, Err(CatalogError::ParentCycle(_))));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = BodyCatalog::new(vec![Body::stationary("Sun").with_color("yellow")]);
        assert!(matches!(result, Err(CatalogError::InvalidColor { .. })));
    }

    #[test]
    fn test_color_parsing() {
        let sun = Body::stationary("Sun").with_color("#ffcc33");
        assert_eq!(sun.color_rgb(), Some([0xff, 0xcc, 0x33]));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("123456"), None);
        assert_eq!(parse_hex_color("#12345g"), None);
    }

    #[test]
    fn test_focusable_defaults_true() {
        let catalog = BodyCatalog::from_ron_str(
            r#"[
                (name: "Sun", is_light_source: true),
                (name: "Probe", focusable: false, orbit: Some((semi_major_axis: 2.0))),
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.focusable().collect::<Vec<_>>(), vec!["Sun"]);
        assert_eq!(catalog.light_sources().count(), 1);
    }

    #[test]
    fn test_parse_error_reported() {
        let result = BodyCatalog::from_ron_str("[(name: )]");
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_solar_system_loads() {
        let catalog = BodyCatalog::solar_system().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.parent_of("Moon").unwrap().name, "Earth");
        assert!(catalog.get("Sun").unwrap().orbit.is_none());
        assert_eq!(catalog.light_sources().next().unwrap().name, "Sun");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bodies.ron");
        std::fs::write(&path, "[(name: \"Sun\")]").unwrap();
        let catalog = BodyCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);

        let missing = BodyCatalog::load(&dir.path().join("missing.ron"));
        assert!(matches!(missing, Err(CatalogError::ReadError(_))));
    }
}
