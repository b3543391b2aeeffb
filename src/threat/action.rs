use crate::registry::IdGenerator;
use itertools::Itertools;
use std::cmp::Reverse;
use strum_macros::Display;

/// The closed set of mitigation action kinds. Matched exhaustively wherever
/// actions are interpreted; each variant carries only the fields valid for
/// it through [`Action`]'s optional columns.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ActionKind {
    /// Propulsive collision avoidance, costs delta-v and fuel.
    Maneuver,
    /// Attitude change to shrink the exposed cross-section.
    Reorient,
    /// Power down non-essential subsystems.
    ShutdownNonessential,
    /// Keep watching, no physical intervention.
    Monitor,
}

/// A recommended mitigation with quantified cost and benefit. Immutable
/// after creation; owned by its parent threat.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Action {
    id: u64,
    kind: ActionKind,
    description: String,
    /// Velocity change in m/s, only present for maneuvers.
    delta_v: Option<f64>,
    /// Propellant cost in kg, only present for maneuvers.
    fuel_cost: Option<f64>,
    success_rate: f64,
    /// Execution duration in seconds.
    duration: f64,
    /// 1 (lowest) to 5 (highest).
    priority: u8,
}

impl Action {
    pub fn id(&self) -> u64 { self.id }
    pub fn kind(&self) -> ActionKind { self.kind }
    pub fn description(&self) -> &str { &self.description }
    pub fn delta_v(&self) -> Option<f64> { self.delta_v }
    pub fn fuel_cost(&self) -> Option<f64> { self.fuel_cost }
    pub fn success_rate(&self) -> f64 { self.success_rate }
    pub fn duration(&self) -> f64 { self.duration }
    pub fn priority(&self) -> u8 { self.priority }
}

/// Ratio of fuel mass in kg per m/s of delta-v used for cost estimates.
const FUEL_PER_DELTA_V: f64 = 0.5;

/// Derives the ranked action list for a conjunction threat.
///
/// An urgent maneuver is prescribed above 0.8 probability or below 100 m
/// miss distance, a regular maneuver above 0.5 or below 300 m. A
/// reorientation and a monitor-only option are always appended, and the
/// result is ordered by descending priority.
pub fn conjunction_actions(
    probability: f64,
    miss_distance_m: f64,
    ids: &mut IdGenerator,
) -> Vec<Action> {
    let mut actions = Vec::with_capacity(3);

    if probability > 0.8 || miss_distance_m < 100.0 {
        let delta_v = (20.0 * (probability / miss_distance_m) * 10_000.0).max(5.0);
        actions.push(Action {
            id: ids.next_id(),
            kind: ActionKind::Maneuver,
            description: String::from("URGENT: execute immediate collision avoidance maneuver"),
            delta_v: Some(delta_v),
            fuel_cost: Some(delta_v * FUEL_PER_DELTA_V),
            success_rate: 0.98,
            duration: 180.0,
            priority: 5,
        });
    } else if probability > 0.5 || miss_distance_m < 300.0 {
        let delta_v = (15.0 * (probability / miss_distance_m) * 10_000.0).max(2.0);
        actions.push(Action {
            id: ids.next_id(),
            kind: ActionKind::Maneuver,
            description: String::from("Execute collision avoidance maneuver"),
            delta_v: Some(delta_v),
            fuel_cost: Some(delta_v * FUEL_PER_DELTA_V),
            success_rate: 0.95,
            duration: 300.0,
            priority: 4,
        });
    }

    actions.push(Action {
        id: ids.next_id(),
        kind: ActionKind::Reorient,
        description: String::from("Minimize cross-section through orientation adjustment"),
        delta_v: None,
        fuel_cost: None,
        success_rate: 0.85,
        duration: 120.0,
        priority: 3,
    });
    actions.push(Action {
        id: ids.next_id(),
        kind: ActionKind::Monitor,
        description: String::from("Continue monitoring and prepare for emergency maneuver"),
        delta_v: None,
        fuel_cost: None,
        success_rate: 0.7,
        duration: 60.0,
        priority: 2,
    });

    rank(actions)
}

/// Derives the ranked action list for a space-weather threat. Success rates
/// are fixed and independent of severity.
pub fn weather_actions(ids: &mut IdGenerator) -> Vec<Action> {
    let actions = vec![
        Action {
            id: ids.next_id(),
            kind: ActionKind::Reorient,
            description: String::from("Orient solar panels to minimize radiation exposure"),
            delta_v: None,
            fuel_cost: None,
            success_rate: 0.9,
            duration: 180.0,
            priority: 4,
        },
        Action {
            id: ids.next_id(),
            kind: ActionKind::ShutdownNonessential,
            description: String::from("Shutdown non-essential systems to reduce radiation damage"),
            delta_v: None,
            fuel_cost: None,
            success_rate: 0.95,
            duration: 300.0,
            priority: 3,
        },
        Action {
            id: ids.next_id(),
            kind: ActionKind::Monitor,
            description: String::from("Monitor radiation levels and system health"),
            delta_v: None,
            fuel_cost: None,
            success_rate: 0.85,
            duration: 60.0,
            priority: 2,
        },
    ];
    rank(actions)
}

/// Orders actions by descending priority for presentation.
fn rank(actions: Vec<Action>) -> Vec<Action> {
    actions.into_iter().sorted_by_key(|action| Reverse(action.priority)).collect()
}
