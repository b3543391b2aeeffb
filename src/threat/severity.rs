use strum_macros::Display;

/// Threat severity, totally ordered from [`Severity::Low`] to
/// [`Severity::Critical`].
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Classifies a conjunction event from its collision probability and miss
/// distance in meters.
///
/// The rules are monotone in both inputs: raising the probability or
/// shrinking the miss distance never lowers the severity.
pub fn conjunction_severity(probability: f64, miss_distance_m: f64) -> Severity {
    if probability > 0.8 || miss_distance_m < 100.0 {
        Severity::Critical
    } else if probability > 0.5 || miss_distance_m < 300.0 {
        Severity::High
    } else if probability > 0.3 || miss_distance_m < 500.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Classifies geomagnetic conditions from the planetary Kp index.
pub fn weather_severity(kp_index: f64) -> Severity {
    if kp_index >= 8.0 {
        Severity::Critical
    } else if kp_index >= 6.0 {
        Severity::High
    } else if kp_index >= 5.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
