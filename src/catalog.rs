//! Static body catalog
//!
//! The catalog is the read-only data source for every orbiting body: orbital
//! parameters for the motion pass plus the display metadata shown in detail
//! panels. It is embedded in the binary and parsed once before the app starts.

use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;

const CATALOG_JSON: &str = include_str!("../assets/bodies.json");

/// Index of a body in the catalog. Stable for the process lifetime.
#[derive(Component, Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// External links shown in a body's detail panel.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct BodyLinks {
    pub nasa: Option<String>,
    pub wiki: Option<String>,
}

/// Immutable descriptor for one orbiting body. Never mutated after load.
#[derive(Deserialize, Debug, Clone)]
pub struct Body {
    pub id: String,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub trivia: String,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub rotation_speed: f32,
    pub size: f32,
    /// Non-linear sRGB components used for the atmosphere shell and orbit ring.
    pub atmosphere_color: [f32; 3],
    #[serde(default)]
    pub links: BodyLinks,
}

impl Body {
    pub fn atmosphere(&self) -> Color {
        let [r, g, b] = self.atmosphere_color;
        Color::srgb(r, g, b)
    }
}

/// The loaded catalog. Ordered; order determines initial orbit phase.
#[derive(Resource, Debug)]
pub struct BodyCatalog {
    bodies: Vec<Body>,
}

impl BodyCatalog {
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn find(&self, slug: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.id == slug).map(BodyId)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Phase offset a body starts its orbit at, derived once from catalog
    /// order so the ring is evenly populated rather than everything
    /// launching from angle 0.
    pub fn initial_angle(&self, id: BodyId) -> f32 {
        if self.bodies.is_empty() {
            return 0.0;
        }
        id.0 as f32 / self.bodies.len() as f32 * std::f32::consts::TAU
    }
}

/// Parse the embedded catalog. Called before the app is built; a malformed
/// catalog is a startup error, not a runtime condition.
pub fn load_embedded() -> anyhow::Result<BodyCatalog> {
    from_json(CATALOG_JSON)
}

fn from_json(json: &str) -> anyhow::Result<BodyCatalog> {
    let bodies: Vec<Body> =
        serde_json::from_str(json).context("failed to parse body catalog JSON")?;
    anyhow::ensure!(!bodies.is_empty(), "body catalog is empty");
    Ok(BodyCatalog { bodies })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = load_embedded().expect("embedded catalog must parse");
        assert!(!catalog.is_empty());
        // Every body gets a usable orbit.
        for (_, body) in catalog.iter() {
            assert!(body.orbit_radius > 0.0);
            assert!(body.orbit_speed > 0.0);
            assert!(body.size > 0.0);
        }
    }

    #[test]
    fn find_resolves_slugs() {
        let catalog = load_embedded().unwrap();
        let earth = catalog.find("earth").expect("earth is in the catalog");
        assert_eq!(catalog.get(earth).unwrap().name, "Earth");
        assert!(catalog.find("pluto").is_none());
    }

    #[test]
    fn initial_angles_are_evenly_spaced() {
        let catalog = load_embedded().unwrap();
        let n = catalog.len();
        let step = std::f32::consts::TAU / n as f32;
        for i in 0..n {
            let expected = i as f32 * step;
            assert!((catalog.initial_angle(BodyId(i)) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn atmosphere_components_stay_nonlinear_srgb() {
        let catalog = load_embedded().unwrap();
        let (_, body) = catalog.iter().next().unwrap();
        let [r, g, b] = body.atmosphere_color;
        // Catalog values are sRGB and must pass through unconverted.
        let srgba = body.atmosphere().to_srgba();
        assert!((srgba.red - r).abs() < 1e-6);
        assert!((srgba.green - g).abs() < 1e-6);
        assert!((srgba.blue - b).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_catalog() {
        assert!(from_json("[]").is_err());
        assert!(from_json("not json").is_err());
    }
}
