use super::id::IdGenerator;
use super::object::{ObjectStatus, TrackedObject};
use crate::error::{StateError, ValidationError};
use crate::threat::{Action, Severity, Threat, is_duplicate};
use crate::tracking::{OrbitalElements, ParsedObject};
use crate::{threat_log, warn};
use chrono::Utc;
use itertools::Itertools;
use std::collections::HashMap;

/// Outcome of offering a threat to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreatDecision {
    /// Accepted and now active under the returned id.
    Accepted(u64),
    /// Suppressed as a re-detection of an already active threat.
    Duplicate,
    /// Dropped because the system-wide active-threat cap is reached and the
    /// severity does not warrant displacing attention.
    CapReached,
    /// Dropped because the referenced object does not exist.
    Orphaned,
}

/// The authoritative in-memory state: tracked objects, their status and the
/// active threats against them.
///
/// All mutations are synchronous and atomic per call and keep the object
/// and threat sets mutually consistent: every active threat's object
/// reference resolves, or the threat is dropped on entry.
#[derive(Debug)]
pub struct Registry {
    objects: HashMap<u64, TrackedObject>,
    threats: HashMap<u64, Threat>,
    selected: Option<u64>,
    ids: IdGenerator,
    threat_cap: usize,
}

impl Registry {
    /// Default bound on simultaneously active threats.
    pub const DEFAULT_THREAT_CAP: usize = 10;

    pub fn new(threat_cap: usize) -> Self {
        Self {
            objects: HashMap::new(),
            threats: HashMap::new(),
            selected: None,
            ids: IdGenerator::new(),
            threat_cap,
        }
    }

    /// Ingests a validated object, assigning its identity. New objects
    /// always start nominal.
    pub fn add_object(&mut self, mut object: TrackedObject) -> u64 {
        let id = self.ids.next_id();
        object.assign_id(id);
        object.set_status(ObjectStatus::Nominal);
        threat_log!("tracking {} as object {id}", object.name());
        self.objects.insert(id, object);
        id
    }

    /// Ingests an object recovered from a tracking record.
    pub fn add_parsed(&mut self, parsed: ParsedObject) -> Result<u64, ValidationError> {
        let object = TrackedObject::new(
            parsed.name,
            Some(parsed.catalog_id),
            parsed.mass,
            parsed.cross_section,
            parsed.elements,
        )?;
        Ok(self.add_object(object))
    }

    /// Removes an object and cascades removal of all its threats.
    pub fn remove_object(&mut self, id: u64) -> Result<TrackedObject, StateError> {
        let object = self.objects.remove(&id).ok_or(StateError::UnknownObject)?;
        let before = self.threats.len();
        self.threats.retain(|_, threat| threat.object_id() != id);
        let cascaded = before - self.threats.len();
        if cascaded > 0 {
            threat_log!("removed object {id} and cascaded {cascaded} threat(s)");
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(object)
    }

    /// Replaces an object's elements with a newly derived set and
    /// re-evaluates its status. This is one of the two paths that may lower
    /// a status.
    pub fn update_elements(
        &mut self,
        id: u64,
        elements: OrbitalElements,
    ) -> Result<(), StateError> {
        let object = self.objects.get_mut(&id).ok_or(StateError::UnknownObject)?;
        object.replace_elements(elements, Utc::now());
        self.re_evaluate(id)
    }

    /// Recomputes an object's status from its currently active threats,
    /// allowing it to drop back once threats are gone. Never invoked
    /// implicitly by threat removal.
    pub fn re_evaluate(&mut self, id: u64) -> Result<(), StateError> {
        let status = self
            .threats
            .values()
            .filter(|threat| threat.object_id() == id)
            .map(|threat| ObjectStatus::from_severity(threat.severity()))
            .max()
            .unwrap_or(ObjectStatus::Nominal);
        let object = self.objects.get_mut(&id).ok_or(StateError::UnknownObject)?;
        object.set_status(status);
        object.touch(Utc::now());
        Ok(())
    }

    /// Offers a classified threat to the registry.
    ///
    /// Applies the dedup predicate, the one-weather-threat-per-object rule
    /// and the active-threat cap, then escalates the owning object's
    /// status. Threats referencing a missing object are dropped as
    /// inconsistent state rather than stored orphaned.
    pub fn add_threat(&mut self, mut threat: Threat) -> ThreatDecision {
        if !self.objects.contains_key(&threat.object_id()) {
            warn!(
                "dropping orphaned {} threat: object {} is not tracked",
                threat.kind(),
                threat.object_id()
            );
            return ThreatDecision::Orphaned;
        }
        let duplicate = self.threats.values().any(|existing| {
            is_duplicate(existing, &threat)
                || (threat.kind().is_weather()
                    && existing.kind().is_weather()
                    && existing.object_id() == threat.object_id())
        });
        if duplicate {
            return ThreatDecision::Duplicate;
        }
        if self.threats.len() >= self.threat_cap && threat.severity() <= Severity::Medium {
            warn!(
                "active-threat cap ({}) reached, dropping new {} threat",
                self.threat_cap,
                threat.severity()
            );
            return ThreatDecision::CapReached;
        }

        let id = self.ids.next_id();
        threat.stamp(id, Utc::now());
        let object_id = threat.object_id();
        threat_log!(
            "threat {id} ({}, {}) detected against object {object_id}: {}",
            threat.kind(),
            threat.severity(),
            threat.description()
        );
        if let Some(object) = self.objects.get_mut(&object_id) {
            object.set_status(object.status().escalate(threat.severity()));
        }
        self.threats.insert(id, threat);
        ThreatDecision::Accepted(id)
    }

    /// Dismisses an active threat. Terminal; the owning object's status is
    /// deliberately left unchanged.
    pub fn dismiss_threat(&mut self, id: u64) -> Result<Threat, StateError> {
        let threat = self.threats.remove(&id).ok_or(StateError::UnknownThreat)?;
        threat_log!("threat {id} dismissed");
        Ok(threat)
    }

    /// Executes one of a threat's recommended actions.
    ///
    /// Terminal for the parent threat, which is removed; other pending
    /// threats of the same object and the object's elements are untouched.
    pub fn execute_action(&mut self, threat_id: u64, action_id: u64) -> Result<Action, StateError> {
        let threat = self.threats.get(&threat_id).ok_or(StateError::UnknownThreat)?;
        let action = threat
            .actions()
            .iter()
            .find(|action| action.id() == action_id)
            .cloned()
            .ok_or(StateError::UnknownAction)?;
        self.threats.remove(&threat_id);
        threat_log!(
            "executed {} action {action_id} for threat {threat_id}: {}",
            action.kind(),
            action.description()
        );
        Ok(action)
    }

    /// Marks an object as the operator's current focus.
    pub fn select(&mut self, id: Option<u64>) -> Result<(), StateError> {
        if let Some(id) = id {
            if !self.objects.contains_key(&id) {
                return Err(StateError::UnknownObject);
            }
        }
        self.selected = id;
        Ok(())
    }

    pub fn selected(&self) -> Option<&TrackedObject> {
        self.selected.and_then(|id| self.objects.get(&id))
    }

    pub fn object(&self, id: u64) -> Option<&TrackedObject> { self.objects.get(&id) }

    /// All tracked objects, ordered by id for stable presentation.
    pub fn objects(&self) -> Vec<&TrackedObject> {
        self.objects.values().sorted_by_key(|object| object.id()).collect()
    }

    pub fn threat(&self, id: u64) -> Option<&Threat> { self.threats.get(&id) }

    /// All active threats, most recently detected last.
    pub fn threats(&self) -> Vec<&Threat> {
        self.threats.values().sorted_by_key(|threat| threat.id()).collect()
    }

    /// Active threats against one object.
    pub fn threats_for(&self, object_id: u64) -> Vec<&Threat> {
        self.threats
            .values()
            .filter(|threat| threat.object_id() == object_id)
            .sorted_by_key(|threat| threat.id())
            .collect()
    }

    pub fn threat_count(&self) -> usize { self.threats.len() }

    pub fn object_count(&self) -> usize { self.objects.len() }

    pub fn threat_cap(&self) -> usize { self.threat_cap }
}

impl Default for Registry {
    fn default() -> Self { Self::new(Self::DEFAULT_THREAT_CAP) }
}
