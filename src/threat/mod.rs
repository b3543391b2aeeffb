mod action;
mod classifier;
mod severity;
mod synthetic;


pub use action::{Action, ActionKind, conjunction_actions, weather_actions};
pub use classifier::{
    ConjunctionEvent, DEDUP_WINDOW_S, Threat, ThreatKind, classify_conjunction, classify_weather,
    is_duplicate,
};
pub use severity::{Severity, conjunction_severity, weather_severity};
pub use synthetic::SyntheticGenerator;
