use crate::error::ValidationError;

/// Standard gravitational parameter of Earth in km³/s².
pub const EARTH_MU: f64 = 398_600.441_8;

/// Mean Earth radius in km, used for relative-scale normalization.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Classical Keplerian elements of an elliptical orbit at a reference epoch.
///
/// Immutable once derived: an updated observation produces a new set of
/// elements instead of mutating an existing one. All angles are stored in
/// degrees, normalized to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis in km, strictly positive.
    semi_major_axis: f64,
    /// Eccentricity, `0 <= e < 1` (elliptical orbits only).
    eccentricity: f64,
    inclination: f64,
    raan: f64,
    arg_periapsis: f64,
    true_anomaly: f64,
}

impl OrbitalElements {
    /// Validates and constructs a set of elements.
    ///
    /// # Arguments
    /// - `semi_major_axis`: km, must be positive.
    /// - `eccentricity`: must lie in `[0, 1)`.
    /// - Angles in degrees; any finite value is accepted and wrapped into
    ///   `[0, 360)`.
    ///
    /// # Errors
    /// [`ValidationError`] when the axis or the eccentricity is out of range.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        raan: f64,
        arg_periapsis: f64,
        true_anomaly: f64,
    ) -> Result<Self, ValidationError> {
        if semi_major_axis <= 0.0 || !semi_major_axis.is_finite() {
            return Err(ValidationError::NonPositiveSemiMajorAxis);
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ValidationError::EccentricityOutOfRange);
        }
        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination: wrap_degrees(inclination),
            raan: wrap_degrees(raan),
            arg_periapsis: wrap_degrees(arg_periapsis),
            true_anomaly: wrap_degrees(true_anomaly),
        })
    }

    pub fn semi_major_axis(&self) -> f64 { self.semi_major_axis }
    pub fn eccentricity(&self) -> f64 { self.eccentricity }
    pub fn inclination(&self) -> f64 { self.inclination }
    pub fn raan(&self) -> f64 { self.raan }
    pub fn arg_periapsis(&self) -> f64 { self.arg_periapsis }
    pub fn true_anomaly(&self) -> f64 { self.true_anomaly }
}

/// Wraps an angle in degrees into `[0, 360)`.
fn wrap_degrees(angle: f64) -> f64 { angle.rem_euclid(360.0) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_hyperbolic_orbits() {
        let res = OrbitalElements::new(7000.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(res.unwrap_err(), ValidationError::EccentricityOutOfRange);
        let res = OrbitalElements::new(7000.0, 1.7, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(res.unwrap_err(), ValidationError::EccentricityOutOfRange);
    }

    #[test]
    fn rejects_non_positive_axis() {
        let res = OrbitalElements::new(0.0, 0.1, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(res.unwrap_err(), ValidationError::NonPositiveSemiMajorAxis);
        let res = OrbitalElements::new(-6800.0, 0.1, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(res.unwrap_err(), ValidationError::NonPositiveSemiMajorAxis);
    }

    #[test]
    fn wraps_angles_into_range() {
        let el = OrbitalElements::new(7000.0, 0.01, 370.0, -90.0, 720.5, 359.9).unwrap();
        assert!((el.inclination() - 10.0).abs() < 1e-9);
        assert!((el.raan() - 270.0).abs() < 1e-9);
        assert!((el.arg_periapsis() - 0.5).abs() < 1e-9);
        assert!((el.true_anomaly() - 359.9).abs() < 1e-9);
    }
}
