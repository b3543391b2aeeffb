use super::elements::{EARTH_MU, EARTH_RADIUS_KM, OrbitalElements};
use super::vec3::Vec3;
use std::f64::consts::PI;

/// Number of segments an orbit path is sampled with by default.
pub const DEFAULT_ORBIT_SEGMENTS: usize = 128;

/// Output scale of computed positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameScale {
    /// Absolute positions in km.
    Kilometers,
    /// Positions normalized by the mean Earth radius, for relative-scale
    /// consumers such as scene renderers.
    EarthRadii,
}

impl FrameScale {
    fn divisor(self) -> f64 {
        match self {
            FrameScale::Kilometers => 1.0,
            FrameScale::EarthRadii => EARTH_RADIUS_KM,
        }
    }
}

/// Computes the inertial Cartesian position for a set of elements.
///
/// The planar radius follows from the orbit equation
/// `r = a(1 - e²) / (1 + e·cos ν)`; the planar point is then rotated through
/// argument of periapsis, inclination and RAAN (a 3-1-3 sequence) into the
/// inertial frame. Pure function of its inputs.
pub fn position(elements: &OrbitalElements, scale: FrameScale) -> Vec3<f64> {
    let rotation = PlaneRotation::from_elements(elements);
    let a = elements.semi_major_axis() / scale.divisor();
    let nu = elements.true_anomaly().to_radians();
    rotation.planar_to_inertial(a, elements.eccentricity(), nu)
}

/// Samples the full orbit as a closed polyline.
///
/// The true anomaly is swept uniformly over `[0, 2π]` with `segments`
/// intervals, yielding `segments + 1` points whose first and last entries
/// coincide for any elliptical input.
pub fn orbit_path(
    elements: &OrbitalElements,
    segments: usize,
    scale: FrameScale,
) -> Vec<Vec3<f64>> {
    let rotation = PlaneRotation::from_elements(elements);
    let a = elements.semi_major_axis() / scale.divisor();
    let e = elements.eccentricity();
    (0..=segments)
        .map(|step| {
            let nu = step as f64 / segments as f64 * 2.0 * PI;
            rotation.planar_to_inertial(a, e, nu)
        })
        .collect()
}

/// Orbital period in seconds from Kepler's third law, `T = 2π·sqrt(a³/μ)`.
pub fn orbital_period(semi_major_axis: f64) -> f64 {
    2.0 * PI * (semi_major_axis.powi(3) / EARTH_MU).sqrt()
}

/// Instantaneous speed in km/s at radius `current_radius` km from the
/// vis-viva equation, `v = sqrt(μ(2/r - 1/a))`.
pub fn orbital_speed(semi_major_axis: f64, current_radius: f64) -> f64 {
    (EARTH_MU * (2.0 / current_radius - 1.0 / semi_major_axis)).sqrt()
}

/// Radius in km at the elements' current true anomaly.
pub fn current_radius(elements: &OrbitalElements) -> f64 {
    let e = elements.eccentricity();
    let nu = elements.true_anomaly().to_radians();
    elements.semi_major_axis() * (1.0 - e * e) / (1.0 + e * nu.cos())
}

/// Altitude above the mean Earth surface in km for a given semi-major axis.
pub fn altitude(semi_major_axis: f64) -> f64 { semi_major_axis - EARTH_RADIUS_KM }

/// Precomputed trigonometry of the orbital-plane orientation, shared between
/// single-position and path sampling.
struct PlaneRotation {
    cos_i: f64,
    sin_i: f64,
    cos_raan: f64,
    sin_raan: f64,
    cos_argp: f64,
    sin_argp: f64,
}

impl PlaneRotation {
    fn from_elements(elements: &OrbitalElements) -> Self {
        let i = elements.inclination().to_radians();
        let raan = elements.raan().to_radians();
        let argp = elements.arg_periapsis().to_radians();
        Self {
            cos_i: i.cos(),
            sin_i: i.sin(),
            cos_raan: raan.cos(),
            sin_raan: raan.sin(),
            cos_argp: argp.cos(),
            sin_argp: argp.sin(),
        }
    }

    /// Evaluates the orbit equation at true anomaly `nu` and rotates the
    /// planar point into the inertial frame.
    fn planar_to_inertial(&self, a: f64, e: f64, nu: f64) -> Vec3<f64> {
        let r = a * (1.0 - e * e) / (1.0 + e * nu.cos());
        let x = r * nu.cos();
        let y = r * nu.sin();

        let px = x * (self.cos_raan * self.cos_argp - self.sin_raan * self.sin_argp * self.cos_i)
            - y * (self.cos_raan * self.sin_argp + self.sin_raan * self.cos_argp * self.cos_i);
        let py = x * (self.sin_raan * self.cos_argp + self.cos_raan * self.sin_argp * self.cos_i)
            - y * (self.sin_raan * self.sin_argp - self.cos_raan * self.cos_argp * self.cos_i);
        let pz = x * self.sin_argp * self.sin_i + y * self.cos_argp * self.sin_i;
        Vec3::new(px, py, pz)
    }
}
