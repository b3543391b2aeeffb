use super::id::IdGenerator;
use super::object::{ObjectStatus, TrackedObject};
use super::registry::{Registry, ThreatDecision};
use crate::feed::{FlareProbabilities, SpaceWeatherSnapshot};
use crate::threat::{
    ActionKind, ConjunctionEvent, Severity, classify_conjunction, classify_weather,
};
use crate::tracking::OrbitalElements;
use chrono::Utc;

fn leo_object(name: &str) -> TrackedObject {
    let elements = OrbitalElements::new(6793.0, 0.0003, 51.64, 90.0, 0.0, 45.0).unwrap();
    TrackedObject::new(String::from(name), Some(String::from("25544")), 420_000.0, 100.0, elements)
        .unwrap()
}

fn conjunction_event(object_id: u64, probability: f64, miss_m: f64, tte: f64) -> ConjunctionEvent {
    ConjunctionEvent {
        object_id,
        other_object: Some(String::from("COSMOS 2251 DEB")),
        time_to_event: tte,
        miss_distance_m: miss_m,
        probability,
        simulated: false,
    }
}

#[test]
fn rejects_invalid_object_properties() {
    let elements = OrbitalElements::new(7000.0, 0.01, 0.0, 0.0, 0.0, 0.0).unwrap();
    assert!(TrackedObject::new(String::from("x"), None, 0.0, 10.0, elements).is_err());
    assert!(TrackedObject::new(String::from("x"), None, 500.0, -1.0, elements).is_err());
}

#[test]
fn status_escalates_and_never_auto_downgrades() {
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let object_id = registry.add_object(leo_object("Station"));
    assert_eq!(registry.object(object_id).unwrap().status(), ObjectStatus::Nominal);

    let critical = classify_conjunction(&conjunction_event(object_id, 0.9, 80.0, 4000.0), &mut ids);
    let ThreatDecision::Accepted(threat_id) = registry.add_threat(critical) else {
        panic!("critical threat must be accepted");
    };
    assert_eq!(registry.object(object_id).unwrap().status(), ObjectStatus::Critical);

    // Removing the threat leaves the status critical: downgrades only
    // happen through explicit re-evaluation or an object update.
    registry.dismiss_threat(threat_id).unwrap();
    assert_eq!(registry.threat_count(), 0);
    assert_eq!(registry.object(object_id).unwrap().status(), ObjectStatus::Critical);

    registry.re_evaluate(object_id).unwrap();
    assert_eq!(registry.object(object_id).unwrap().status(), ObjectStatus::Nominal);
}

#[test]
fn high_severity_maps_to_warning() {
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let object_id = registry.add_object(leo_object("Station"));
    let high = classify_conjunction(&conjunction_event(object_id, 0.6, 400.0, 4000.0), &mut ids);
    assert_eq!(high.severity(), Severity::High);
    registry.add_threat(high);
    assert_eq!(registry.object(object_id).unwrap().status(), ObjectStatus::Warning);
}

#[test]
fn deduplicates_events_within_the_time_window() {
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let object_id = registry.add_object(leo_object("Station"));

    let first = classify_conjunction(&conjunction_event(object_id, 0.6, 400.0, 4000.0), &mut ids);
    let echo = classify_conjunction(&conjunction_event(object_id, 0.6, 400.0, 4250.0), &mut ids);
    let distinct =
        classify_conjunction(&conjunction_event(object_id, 0.6, 400.0, 9000.0), &mut ids);

    assert!(matches!(registry.add_threat(first), ThreatDecision::Accepted(_)));
    assert_eq!(registry.add_threat(echo), ThreatDecision::Duplicate);
    assert!(matches!(registry.add_threat(distinct), ThreatDecision::Accepted(_)));
    assert_eq!(registry.threat_count(), 2);
}

#[test]
fn cap_drops_new_low_and_medium_threats() {
    let mut registry = Registry::new(3);
    let mut ids = IdGenerator::new();
    let object_id = registry.add_object(leo_object("Station"));

    for step in 0..3 {
        let event =
            conjunction_event(object_id, 0.4, 450.0, 4000.0 + 1000.0 * f64::from(step));
        let threat = classify_conjunction(&event, &mut ids);
        assert!(matches!(registry.add_threat(threat), ThreatDecision::Accepted(_)));
    }
    assert_eq!(registry.threat_count(), 3);

    let medium = classify_conjunction(&conjunction_event(object_id, 0.4, 450.0, 20_000.0), &mut ids);
    assert_eq!(registry.add_threat(medium), ThreatDecision::CapReached);

    // Critical threats still displace attention at the cap.
    let critical =
        classify_conjunction(&conjunction_event(object_id, 0.95, 50.0, 30_000.0), &mut ids);
    assert!(matches!(registry.add_threat(critical), ThreatDecision::Accepted(_)));
}

#[test]
fn at_most_one_weather_threat_per_object() {
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let object_id = registry.add_object(leo_object("Station"));
    let probabilities = FlareProbabilities { c_class: 90.0, m_class: 55.0, x_class: 20.0 };

    let storm = SpaceWeatherSnapshot::from_kp(8.5, 180.0, probabilities, Utc::now());
    let first = classify_weather(&storm, object_id, &mut ids).unwrap();
    assert!(matches!(registry.add_threat(first), ThreatDecision::Accepted(_)));

    // Conditions easing to a weaker storm must not stack a second weather
    // threat on the same object.
    let weaker = SpaceWeatherSnapshot::from_kp(6.5, 150.0, probabilities, Utc::now());
    let echo = classify_weather(&weaker, object_id, &mut ids).unwrap();
    assert_eq!(registry.add_threat(echo), ThreatDecision::Duplicate);
    assert_eq!(registry.threat_count(), 1);

    // Conjunction threats are unaffected by the weather rule.
    let conjunction =
        classify_conjunction(&conjunction_event(object_id, 0.6, 400.0, 4000.0), &mut ids);
    assert!(matches!(registry.add_threat(conjunction), ThreatDecision::Accepted(_)));
    assert_eq!(registry.threat_count(), 2);
}

#[test]
fn orphaned_threats_are_dropped() {
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let threat = classify_conjunction(&conjunction_event(404, 0.9, 80.0, 4000.0), &mut ids);
    assert_eq!(registry.add_threat(threat), ThreatDecision::Orphaned);
    assert_eq!(registry.threat_count(), 0);
}

#[test]
fn removing_an_object_cascades_its_threats() {
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let first = registry.add_object(leo_object("Station"));
    let second = registry.add_object(leo_object("Observer"));
    registry.select(Some(first)).unwrap();

    let threat = classify_conjunction(&conjunction_event(first, 0.6, 400.0, 4000.0), &mut ids);
    registry.add_threat(threat);
    let other = classify_conjunction(&conjunction_event(second, 0.6, 400.0, 4000.0), &mut ids);
    registry.add_threat(other);

    registry.remove_object(first).unwrap();
    assert_eq!(registry.threat_count(), 1);
    assert!(registry.threats_for(first).is_empty());
    assert!(registry.selected().is_none());
    assert!(registry.remove_object(first).is_err());
}

#[test]
fn executing_an_action_removes_only_its_parent_threat() {
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let object_id = registry.add_object(leo_object("Station"));

    let urgent = classify_conjunction(&conjunction_event(object_id, 0.9, 80.0, 4000.0), &mut ids);
    let pending = classify_conjunction(&conjunction_event(object_id, 0.6, 400.0, 9000.0), &mut ids);
    let ThreatDecision::Accepted(urgent_id) = registry.add_threat(urgent) else {
        panic!("must accept");
    };
    let ThreatDecision::Accepted(pending_id) = registry.add_threat(pending) else {
        panic!("must accept");
    };

    let elements_before = *registry.object(object_id).unwrap().elements();
    let action_id = registry.threat(urgent_id).unwrap().actions()[0].id();
    let action = registry.execute_action(urgent_id, action_id).unwrap();
    assert_eq!(action.kind(), ActionKind::Maneuver);

    assert!(registry.threat(urgent_id).is_none());
    assert!(registry.threat(pending_id).is_some());
    // Action execution models an operator decision, not a propagation step.
    assert_eq!(*registry.object(object_id).unwrap().elements(), elements_before);

    assert!(registry.execute_action(pending_id, 424_242).is_err());
}

#[test]
fn end_to_end_eccentric_orbit_close_approach() {
    // Highly eccentric orbit with a close, probable approach: the threat
    // must classify critical and lead with an urgent maneuver.
    let mut registry = Registry::default();
    let mut ids = IdGenerator::new();
    let elements = OrbitalElements::new(26_554.0, 0.72, 63.4, 45.0, 270.0, 0.0).unwrap();
    let object = TrackedObject::new(
        String::from("Molniya Orbit CommSat"),
        None,
        2500.0,
        18.0,
        elements,
    )
    .unwrap();
    let object_id = registry.add_object(object);

    let mut event = conjunction_event(object_id, 0.85, 80.0, 7200.0);
    event.simulated = true;
    event.other_object = None;
    let threat = classify_conjunction(&event, &mut ids);
    assert_eq!(threat.severity(), Severity::Critical);
    assert!(threat.description().starts_with("[SIMULATED]"));

    let ThreatDecision::Accepted(threat_id) = registry.add_threat(threat) else {
        panic!("critical threat must be accepted");
    };
    let stored = registry.threat(threat_id).unwrap();
    let urgent = &stored.actions()[0];
    assert_eq!(urgent.kind(), ActionKind::Maneuver);
    assert_eq!(urgent.priority(), 5);
    assert!(urgent.delta_v().unwrap() >= 5.0);
    assert_eq!(registry.object(object_id).unwrap().status(), ObjectStatus::Critical);
}
