use super::elements::{EARTH_MU, OrbitalElements};
use super::geometry::{self, FrameScale};
use super::tle::{self, TleRecord};
use std::f64::consts::PI;

/// Test fixture: renders elements back into the fixed-column two-line
/// layout. Not part of the production surface.
fn serialize(catalog: &str, elements: &OrbitalElements) -> (String, String) {
    let n_rad_per_sec = (EARTH_MU / elements.semi_major_axis().powi(3)).sqrt();
    let mean_motion = n_rad_per_sec * 86_400.0 / (2.0 * PI);
    let ecc_digits = format!("{:.7}", elements.eccentricity())
        .trim_start_matches("0.")
        .to_string();
    let line1 = format!("1 {catalog:>5}U 98067A   24001.00000000  .00016717  00000-0  10270-3 0  9005");
    let line2 = format!(
        "2 {catalog:>5} {:8.4} {:8.4} {ecc_digits} {:8.4} {:8.4} {mean_motion:11.8}",
        elements.inclination(),
        elements.raan(),
        elements.arg_periapsis(),
        elements.true_anomaly(),
    );
    (line1, line2)
}

#[test]
fn round_trips_a_valid_record() {
    let elements = OrbitalElements::new(6793.0, 0.0003, 51.64, 90.0, 10.0, 45.0).unwrap();
    let (line1, line2) = serialize("25544", &elements);
    let record = TleRecord { name: None, line1, line2 };
    let parsed = tle::parse_record(&record).unwrap();

    assert_eq!(parsed.catalog_id, "25544");
    assert_eq!(parsed.name, "Object 25544");
    let got = parsed.elements;
    assert!((got.semi_major_axis() - elements.semi_major_axis()).abs() < 1e-2);
    assert!((got.eccentricity() - elements.eccentricity()).abs() < 1e-7);
    assert!((got.inclination() - elements.inclination()).abs() < 1e-4);
    assert!((got.raan() - elements.raan()).abs() < 1e-4);
    assert!((got.arg_periapsis() - elements.arg_periapsis()).abs() < 1e-4);
    assert!((got.true_anomaly() - elements.true_anomaly()).abs() < 1e-4);
}

#[test]
fn derives_leo_semi_major_axis_from_mean_motion() {
    // Mean motion of roughly 15.5 rev/day corresponds to the textbook
    // low-earth-orbit semi-major axis of about 6793 km.
    let line1 = String::from("1 25544U 98067A   24001.00000000  .00016717  00000-0  10270-3 0  9005");
    let line2 =
        String::from("2 25544  51.6400  90.0000 0003000  10.0000  45.0000 15.50000000");
    let record = TleRecord { name: None, line1, line2 };
    let parsed = tle::parse_record(&record).unwrap();
    assert!((parsed.elements.semi_major_axis() - 6793.0).abs() < 5.0);
}

#[test]
fn reports_short_and_non_numeric_records() {
    let record = TleRecord {
        name: None,
        line1: String::from("1 25544"),
        line2: String::from("2 25544  51.6400"),
    };
    assert!(tle::parse_record(&record).is_err());

    let line1 = String::from("1 25544U 98067A   24001.00000000  .00016717  00000-0  10270-3 0  9005");
    let line2 =
        String::from("2 25544  51.6400  90.0000 0003000  10.0000  45.0000 xx.xxxxxxxx");
    let record = TleRecord { name: None, line1, line2 };
    assert!(tle::parse_record(&record).is_err());
}

#[test]
fn batch_import_skips_malformed_and_continues() {
    let elements = OrbitalElements::new(6793.0, 0.0003, 51.64, 90.0, 10.0, 45.0).unwrap();
    let (good1, good2) = serialize("25544", &elements);
    let (other1, other2) = serialize("43013", &elements);
    let blob = format!(
        "NORAD_ID,TLE\n{good1}\n{good2}\n1 99999U\n2 99999  bad\n{other1}\t{other2}\n"
    );
    let parsed = tle::parse_batch(&blob);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].catalog_id, "25544");
    // Joined-layout records are named after the international designator.
    assert_eq!(parsed[1].name, "Sat-98067A");
}

#[test]
fn batch_import_handles_space_joined_layout() {
    let elements = OrbitalElements::new(7200.0, 0.002, 98.0, 270.0, 45.0, 270.0).unwrap();
    let (line1, line2) = serialize("39084", &elements);
    let blob = format!("{line1}  {line2}");
    let parsed = tle::parse_batch(&blob);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].catalog_id, "39084");
}

#[test]
fn orbit_path_is_a_closed_polyline() {
    let molniya = OrbitalElements::new(26_554.0, 0.72, 63.4, 45.0, 270.0, 0.0).unwrap();
    let path = geometry::orbit_path(&molniya, 128, FrameScale::Kilometers);
    assert_eq!(path.len(), 129);
    let first = path[0];
    let last = path[path.len() - 1];
    assert!(first.euclid_distance(&last) < 1e-6 * molniya.semi_major_axis());
}

#[test]
fn position_of_circular_equatorial_orbit() {
    let circular = OrbitalElements::new(7000.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
    let pos = geometry::position(&circular, FrameScale::Kilometers);
    assert!((pos.x() - 7000.0).abs() < 1e-6);
    assert!(pos.y().abs() < 1e-6);
    assert!(pos.z().abs() < 1e-6);

    let scaled = geometry::position(&circular, FrameScale::EarthRadii);
    assert!((scaled.x() - 7000.0 / 6371.0).abs() < 1e-9);
}

#[test]
fn period_and_speed_match_two_body_theory() {
    // Geostationary: one sidereal day.
    assert!((geometry::orbital_period(42_164.0) - 86_164.0).abs() < 60.0);
    // Circular orbit: vis-viva reduces to sqrt(mu / a).
    let v = geometry::orbital_speed(7000.0, 7000.0);
    assert!((v - (EARTH_MU / 7000.0).sqrt()).abs() < 1e-9);
}
