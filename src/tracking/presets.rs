use super::elements::OrbitalElements;
use rand::Rng;

/// A predefined object configuration for demos and quick testing.
#[derive(Debug, Clone)]
pub struct PresetObject {
    pub name: &'static str,
    pub mass: f64,
    pub cross_section: f64,
    pub elements: OrbitalElements,
}

/// Broad orbit regimes used when generating randomized elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitClass {
    Leo,
    Meo,
    Geo,
}

impl OrbitClass {
    fn axis_range(self) -> (f64, f64) {
        match self {
            OrbitClass::Leo => (6500.0, 8000.0),
            OrbitClass::Meo => (12_000.0, 30_000.0),
            OrbitClass::Geo => (41_000.0, 43_000.0),
        }
    }
}

/// Well-known object configurations spanning the common orbit regimes.
pub fn demo_objects() -> Vec<PresetObject> {
    let configs = [
        ("ISS (LEO)", 420_000.0, 100.0, (6793.0, 0.0003, 51.64, 90.0, 0.0, 45.0)),
        ("GPS Satellite (MEO)", 2000.0, 15.0, (26_560.0, 0.01, 55.0, 120.0, 30.0, 90.0)),
        ("Geostationary CommSat", 3500.0, 20.0, (42_164.0, 0.0001, 0.1, 180.0, 0.0, 180.0)),
        ("Polar Earth Observer", 1500.0, 12.0, (7200.0, 0.002, 98.0, 270.0, 45.0, 270.0)),
        ("Molniya Orbit CommSat", 2500.0, 18.0, (26_554.0, 0.72, 63.4, 45.0, 270.0, 0.0)),
    ];
    configs
        .into_iter()
        .filter_map(|(name, mass, cross_section, (a, e, i, raan, argp, nu))| {
            let elements = OrbitalElements::new(a, e, i, raan, argp, nu).ok()?;
            Some(PresetObject { name, mass, cross_section, elements })
        })
        .collect()
}

/// Generates randomized, near-circular elements within a regime's realistic
/// ranges.
pub fn random_orbit<R: Rng>(class: OrbitClass, rng: &mut R) -> OrbitalElements {
    let (min_a, max_a) = class.axis_range();
    OrbitalElements::new(
        rng.random_range(min_a..max_a),
        rng.random_range(0.0..0.05),
        rng.random_range(0.0..180.0),
        rng.random_range(0.0..360.0),
        rng.random_range(0.0..360.0),
        rng.random_range(0.0..360.0),
    )
    .unwrap_or_else(|_| unreachable!("ranges above are always valid"))
}
