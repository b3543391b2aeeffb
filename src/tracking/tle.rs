use super::elements::{EARTH_MU, OrbitalElements};
use crate::error::ParseError;
use crate::{info, warn};
use std::f64::consts::PI;
use std::ops::Range;

/// Default mass in kg assumed for objects ingested from tracking records,
/// which carry no physical properties.
pub const DEFAULT_MASS_KG: f64 = 500.0;
/// Default cross-sectional area in m² assumed for ingested objects.
pub const DEFAULT_CROSS_SECTION_M2: f64 = 10.0;

/// A raw two-line tracking record plus an optional display name.
#[derive(Debug, Clone)]
pub struct TleRecord {
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

/// An object successfully recovered from a tracking record, ready for
/// registry ingestion.
#[derive(Debug, Clone)]
pub struct ParsedObject {
    pub catalog_id: String,
    pub name: String,
    pub elements: OrbitalElements,
    pub mass: f64,
    pub cross_section: f64,
}

/// Fixed column offsets of the two-line tracking format (zero-based,
/// end-exclusive).
mod columns {
    use std::ops::Range;

    pub const CATALOG_ID: Range<usize> = 2..7;
    pub const INTL_DESIGNATOR: Range<usize> = 9..17;
    pub const INCLINATION: Range<usize> = 8..16;
    pub const RAAN: Range<usize> = 17..25;
    pub const ECCENTRICITY: Range<usize> = 26..33;
    pub const ARG_PERIAPSIS: Range<usize> = 34..42;
    pub const MEAN_ANOMALY: Range<usize> = 43..51;
    pub const MEAN_MOTION: Range<usize> = 52..63;
}

/// Parses one two-line record into an object.
///
/// The semi-major axis is derived from the mean motion via Kepler's third
/// law; the mean anomaly is used as an approximation for the true anomaly
/// (no Kepler-equation solve).
///
/// # Errors
/// [`ParseError`] when a line is short or a numeric field does not parse.
/// The caller is expected to skip the record and continue its batch.
pub fn parse_record(record: &TleRecord) -> Result<ParsedObject, ParseError> {
    let line1 = record.line1.trim();
    let line2 = record.line2.trim();

    let catalog_id = text_field(line1, columns::CATALOG_ID)?.to_string();
    let inclination = numeric_field(line2, columns::INCLINATION, "inclination")?;
    let raan = numeric_field(line2, columns::RAAN, "raan")?;
    let arg_periapsis = numeric_field(line2, columns::ARG_PERIAPSIS, "argument of periapsis")?;
    let mean_anomaly = numeric_field(line2, columns::MEAN_ANOMALY, "mean anomaly")?;
    let mean_motion = numeric_field(line2, columns::MEAN_MOTION, "mean motion")?;

    // Eccentricity digits are stored without the leading decimal point.
    let ecc_digits = text_field(line2, columns::ECCENTRICITY)?;
    let eccentricity: f64 = format!("0.{ecc_digits}")
        .parse()
        .map_err(|_| ParseError::MalformedField("eccentricity"))?;

    if mean_motion <= 0.0 {
        return Err(ParseError::MalformedField("mean motion"));
    }
    // n [rev/day] -> rad/s, then a = (mu / n^2)^(1/3).
    let n_rad_per_sec = mean_motion * 2.0 * PI / 86_400.0;
    let semi_major_axis = (EARTH_MU / (n_rad_per_sec * n_rad_per_sec)).cbrt();

    let elements = OrbitalElements::new(
        semi_major_axis,
        eccentricity,
        inclination,
        raan,
        arg_periapsis,
        mean_anomaly,
    )
    .map_err(|_| ParseError::MalformedField("orbital elements"))?;

    let name = record
        .name
        .clone()
        .unwrap_or_else(|| format!("Object {catalog_id}"));

    Ok(ParsedObject {
        catalog_id,
        name,
        elements,
        mass: DEFAULT_MASS_KG,
        cross_section: DEFAULT_CROSS_SECTION_M2,
    })
}

/// Scans a text blob for line-1/line-2 pairs and parses every record found.
///
/// Two layouts are supported: the traditional one record per two adjacent
/// lines, and both lines joined on a single line by a tab or a run of
/// spaces. Lines matching neither layout (headers, comments) are skipped,
/// and a malformed record is logged and dropped without aborting the batch.
pub fn parse_batch(blob: &str) -> Vec<ParsedObject> {
    let lines: Vec<&str> =
        blob.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    let mut parsed = Vec::new();
    let mut skipped = 0usize;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let record = if let Some((line1, line2)) = split_joined(line) {
            i += 1;
            Some(named_record(line1, line2))
        } else if line.starts_with("1 ") {
            if lines.get(i + 1).is_some_and(|next| next.starts_with("2 ")) {
                let record = named_record(line, lines[i + 1]);
                i += 2;
                Some(record)
            } else {
                warn!("tracking record line 1 without companion line 2, skipping");
                skipped += 1;
                i += 1;
                None
            }
        } else {
            i += 1;
            None
        };

        if let Some(record) = record {
            match parse_record(&record) {
                Ok(object) => {
                    info!("parsed tracking record for {}", object.name);
                    parsed.push(object);
                }
                Err(e) => {
                    warn!("skipping malformed tracking record: {e}");
                    skipped += 1;
                }
            }
        }
    }
    if skipped > 0 {
        warn!("batch import skipped {skipped} malformed record(s), kept {}", parsed.len());
    }
    parsed
}

/// Splits a line that carries both record lines joined by a tab or by two
/// or more spaces. Returns `None` when the line is not in the joined layout.
fn split_joined(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with("1 ") {
        return None;
    }
    let split_at = line.find("\t2 ").or_else(|| line.find("  2 "))?;
    let line1 = line[..split_at].trim();
    let line2 = line[split_at..].trim();
    Some((line1, line2))
}

/// Builds a record with a display name derived from the international
/// designator on line 1, falling back to the catalog id.
fn named_record(line1: &str, line2: &str) -> TleRecord {
    let designator = line1
        .get(columns::INTL_DESIGNATOR)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| format!("Sat-{d}"));
    TleRecord {
        name: designator,
        line1: line1.to_string(),
        line2: line2.to_string(),
    }
}

fn text_field(line: &str, range: Range<usize>) -> Result<&str, ParseError> {
    line.get(range).map(str::trim).ok_or(ParseError::LineTooShort)
}

fn numeric_field(
    line: &str,
    range: Range<usize>,
    what: &'static str,
) -> Result<f64, ParseError> {
    text_field(line, range)?.parse().map_err(|_| ParseError::MalformedField(what))
}
