use crate::error::ValidationError;
use crate::threat::Severity;
use crate::tracking::OrbitalElements;
use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Derived health of a tracked object. Escalation is monotone; the status
/// is never lowered automatically when threats disappear, only an explicit
/// re-evaluation or an object update may do that.
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum ObjectStatus {
    Nominal,
    Warning,
    Critical,
}

impl ObjectStatus {
    /// Maps a threat severity onto the status scale: critical severity
    /// forces critical status, high forces at least a warning, anything
    /// lower leaves the status untouched.
    pub fn from_severity(severity: Severity) -> ObjectStatus {
        match severity {
            Severity::Critical => ObjectStatus::Critical,
            Severity::High => ObjectStatus::Warning,
            Severity::Low | Severity::Medium => ObjectStatus::Nominal,
        }
    }

    /// Escalates towards the level implied by `severity`, never downwards.
    pub fn escalate(self, severity: Severity) -> ObjectStatus {
        self.max(Self::from_severity(severity))
    }
}

/// One orbiting object under observation. Owned exclusively by the
/// registry: created on ingestion, updated in place, removed explicitly.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TrackedObject {
    id: u64,
    name: String,
    /// Catalog identity when the object came from tracking data; manually
    /// entered objects have none and cannot be queried upstream.
    catalog_id: Option<String>,
    /// kg, strictly positive.
    mass: f64,
    /// m², strictly positive.
    cross_section: f64,
    elements: OrbitalElements,
    status: ObjectStatus,
    last_update: DateTime<Utc>,
}

impl TrackedObject {
    /// Validates the physical properties and builds an object awaiting
    /// registry ingestion (id 0 until assigned).
    pub fn new(
        name: String,
        catalog_id: Option<String>,
        mass: f64,
        cross_section: f64,
        elements: OrbitalElements,
    ) -> Result<Self, ValidationError> {
        if mass <= 0.0 || !mass.is_finite() {
            return Err(ValidationError::NonPositiveMass);
        }
        if cross_section <= 0.0 || !cross_section.is_finite() {
            return Err(ValidationError::NonPositiveCrossSection);
        }
        Ok(Self {
            id: 0,
            name,
            catalog_id,
            mass,
            cross_section,
            elements,
            status: ObjectStatus::Nominal,
            last_update: Utc::now(),
        })
    }

    pub fn id(&self) -> u64 { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn catalog_id(&self) -> Option<&str> { self.catalog_id.as_deref() }
    pub fn mass(&self) -> f64 { self.mass }
    pub fn cross_section(&self) -> f64 { self.cross_section }
    pub fn elements(&self) -> &OrbitalElements { &self.elements }
    pub fn status(&self) -> ObjectStatus { self.status }
    pub fn last_update(&self) -> DateTime<Utc> { self.last_update }

    pub(crate) fn assign_id(&mut self, id: u64) { self.id = id; }

    pub(crate) fn set_status(&mut self, status: ObjectStatus) { self.status = status; }

    /// Replaces the elements with a newly derived set; elements are never
    /// mutated in place.
    pub(crate) fn replace_elements(&mut self, elements: OrbitalElements, now: DateTime<Utc>) {
        self.elements = elements;
        self.last_update = now;
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) { self.last_update = now; }
}
