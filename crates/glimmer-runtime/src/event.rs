//! Engine events

use serde::Serialize;

/// Notifications the particle engine raises for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The pinch burst started (`active = true`) or settled (`active = false`)
    GestureActiveChanged { active: bool, at_ms: f64 },
}
