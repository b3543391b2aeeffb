#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
//! Conjunction and space-weather risk triage for tracked orbiting objects.
//!
//! The crate is a pure engine: it parses two-line tracking records into
//! orbital elements, derives positions and orbit paths from classical
//! two-body geometry, classifies conjunction and space-weather threats,
//! recommends mitigation actions and keeps object/threat state consistent
//! in the [`registry::Registry`]. Rendering, persistence and transport
//! are left to the consuming application.

pub mod config;
pub mod error;
pub mod feed;
mod logger;
pub mod registry;
pub mod threat;
pub mod tracking;

pub use config::{Config, ThreatMode};
pub use error::{FeedError, ParseError, StateError, ValidationError};
pub use registry::{ObjectStatus, Registry, TrackedObject};
pub use threat::{Action, ActionKind, Severity, Threat, ThreatKind};
pub use tracking::{OrbitalElements, ParsedObject};
