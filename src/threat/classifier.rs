use super::action::{Action, conjunction_actions, weather_actions};
use super::severity::{Severity, conjunction_severity, weather_severity};
use crate::feed::{FlareLevel, SpaceWeatherSnapshot};
use crate::registry::IdGenerator;
use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Two active conjunction threats for the same object and kind whose
/// times-to-event differ by less than this are treated as the same physical
/// event.
pub const DEDUP_WINDOW_S: f64 = 300.0;

#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ThreatKind {
    /// Close approach with an uncatalogued debris object.
    DebrisConjunction,
    /// Close approach with a catalogued, tracked object.
    TrackedConjunction,
    CoronalMassEjection,
    SolarStorm,
}

impl ThreatKind {
    /// Whether this kind originates from space-weather conditions rather
    /// than a predicted close approach.
    pub fn is_weather(self) -> bool {
        matches!(self, ThreatKind::CoronalMassEjection | ThreatKind::SolarStorm)
    }
}

/// A detected threat against one tracked object.
///
/// Created by the classifier, owned by the registry. The id and the
/// detection timestamp are assigned when the registry accepts the threat.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Threat {
    id: u64,
    object_id: u64,
    kind: ThreatKind,
    severity: Severity,
    /// Seconds until the predicted event.
    time_to_event: f64,
    probability: f64,
    description: String,
    actions: Vec<Action>,
    detected_at: DateTime<Utc>,
}

impl Threat {
    pub fn id(&self) -> u64 { self.id }
    pub fn object_id(&self) -> u64 { self.object_id }
    pub fn kind(&self) -> ThreatKind { self.kind }
    pub fn severity(&self) -> Severity { self.severity }
    pub fn time_to_event(&self) -> f64 { self.time_to_event }
    pub fn probability(&self) -> f64 { self.probability }
    pub fn description(&self) -> &str { &self.description }
    pub fn actions(&self) -> &[Action] { &self.actions }
    pub fn detected_at(&self) -> DateTime<Utc> { self.detected_at }

    /// Registry-side identity assignment on acceptance.
    pub(crate) fn stamp(&mut self, id: u64, detected_at: DateTime<Utc>) {
        self.id = id;
        self.detected_at = detected_at;
    }
}

/// A normalized close-approach event, the classifier's conjunction input
/// contract. Produced by the feed adapter from upstream records or by the
/// synthetic generator.
#[derive(Debug, Clone)]
pub struct ConjunctionEvent {
    /// Registry id of the threatened object.
    pub object_id: u64,
    /// Display name or catalog id of the other object, if known.
    pub other_object: Option<String>,
    /// Seconds until the time of closest approach.
    pub time_to_event: f64,
    pub miss_distance_m: f64,
    pub probability: f64,
    /// Set when the event was produced by the synthetic generator.
    pub simulated: bool,
}

/// Classifies a conjunction event into a threat with ranked actions.
pub fn classify_conjunction(event: &ConjunctionEvent, ids: &mut IdGenerator) -> Threat {
    let severity = conjunction_severity(event.probability, event.miss_distance_m);
    let kind = if event.other_object.is_some() {
        ThreatKind::TrackedConjunction
    } else {
        ThreatKind::DebrisConjunction
    };
    let provenance = if event.simulated { "[SIMULATED] " } else { "" };
    let other = event.other_object.as_deref().unwrap_or("unidentified debris");
    let description = format!(
        "{provenance}Close approach with {other}. Miss distance: {:.0} m",
        event.miss_distance_m
    );
    Threat {
        id: 0,
        object_id: event.object_id,
        kind,
        severity,
        time_to_event: event.time_to_event.max(0.0),
        probability: event.probability,
        description,
        actions: conjunction_actions(event.probability, event.miss_distance_m, ids),
        detected_at: Utc::now(),
    }
}

/// Classifies current space-weather conditions against one object.
///
/// Returns `None` unless the conditions are dangerous (Kp at 6 or above, or
/// a storm-level flare); calm weather raises no threat.
pub fn classify_weather(
    weather: &SpaceWeatherSnapshot,
    object_id: u64,
    ids: &mut IdGenerator,
) -> Option<Threat> {
    if !weather.is_dangerous() {
        return None;
    }
    let kind = if weather.flare_level() == FlareLevel::Storm {
        ThreatKind::SolarStorm
    } else {
        ThreatKind::CoronalMassEjection
    };
    let description = format!(
        "High solar activity detected. Kp={:.1}, Solar Wind={:.0} km/s",
        weather.kp_index(),
        weather.solar_wind_speed()
    );
    Some(Threat {
        id: 0,
        object_id,
        kind,
        severity: weather_severity(weather.kp_index()),
        time_to_event: 3600.0,
        probability: 0.7,
        description,
        actions: weather_actions(ids),
        detected_at: Utc::now(),
    })
}

/// Deduplication predicate: an incoming threat duplicates an existing one
/// when both target the same object with the same kind and their
/// times-to-event lie within [`DEDUP_WINDOW_S`] of each other.
pub fn is_duplicate(existing: &Threat, incoming: &Threat) -> bool {
    existing.object_id == incoming.object_id
        && existing.kind == incoming.kind
        && (existing.time_to_event - incoming.time_to_event).abs() < DEDUP_WINDOW_S
}
