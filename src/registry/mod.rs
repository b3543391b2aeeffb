mod id;
mod object;
#[allow(clippy::module_inception)]
mod registry;

#[cfg(test)]
mod tests;

pub use id::IdGenerator;
pub use object::{ObjectStatus, TrackedObject};
pub use registry::{Registry, ThreatDecision};
