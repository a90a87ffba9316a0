//! Gesture/animation state machine
//!
//! The state is a small `Copy` value advanced by a pure function, so the
//! transition rules can be exercised without any particle buffers:
//!
//! ```text
//! MORPHING  --(pinch rising edge)-->        EXPLODING
//! EXPLODING --(elapsed >= duration_ms)-->   MORPHING
//! ```

use crate::config::EngineConfig;
use glimmer_core::Vec3;
use glimmer_gesture::GestureSample;
use glimmer_shapes::MorphTarget;
use serde::Serialize;

/// Progress within this distance of 1.0 counts as a completed cycle, so that
/// `1 / rate` ticks flip the target exactly once despite rounding.
const PROGRESS_EPSILON: f64 = 1e-9;

/// What the particles are doing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EngineMode {
    /// Drifting toward the active morph target
    Morphing,
    /// Flying outward from a pinch; the start time exists only in this mode
    Exploding { started_at_ms: f64 },
}

impl EngineMode {
    pub fn is_exploding(&self) -> bool {
        matches!(self, EngineMode::Exploding { .. })
    }
}

/// A mode change, reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    ExplosionStarted,
    ExplosionEnded,
}

impl Transition {
    /// The "gesture active" flag the presentation layer shows
    pub fn gesture_active(self) -> bool {
        matches!(self, Transition::ExplosionStarted)
    }
}

/// Parameters of a burst to apply to the particle field this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub palm: Vec3,
    /// `base_intensity + velocity_gain * hand_velocity`
    pub intensity: f32,
}

/// The engine's animation state, one instance for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineState {
    pub mode: EngineMode,
    pub morph_target: MorphTarget,
    /// In [0, 1); wraps to 0 when the target flips
    pub morph_progress: f64,
    /// Whether the last observed sample was pinching, for edge detection
    pub pinch_held: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            mode: EngineMode::Morphing,
            morph_target: MorphTarget::Heart,
            morph_progress: 0.0,
            pinch_held: false,
        }
    }
}

/// Result of advancing the state by one tick
#[derive(Debug, Clone, PartialEq)]
pub struct StateStep {
    pub state: EngineState,
    /// Transitions taken this tick, in order
    pub transitions: Vec<Transition>,
    /// Set on the tick an explosion starts
    pub burst: Option<Burst>,
    /// Set on the tick the morph target flips
    pub flipped: bool,
}

impl EngineState {
    /// Advance one tick at simulation time `now_ms` given the latest gesture.
    ///
    /// Order within a tick: an expired explosion ends first, then a pinch
    /// rising edge may start a new one, then (if morphing) the morph
    /// progress advances.
    pub fn next(
        self,
        now_ms: f64,
        sample: Option<&GestureSample>,
        config: &EngineConfig,
    ) -> StateStep {
        let mut state = self;
        let mut transitions = Vec::new();
        let mut burst = None;
        let mut flipped = false;

        if let EngineMode::Exploding { started_at_ms } = state.mode {
            if now_ms - started_at_ms >= config.explosion.duration_ms {
                state.mode = EngineMode::Morphing;
                transitions.push(Transition::ExplosionEnded);
            }
        }

        let pinching = sample.is_some_and(|s| s.is_pinching);
        let rising_edge = pinching && !state.pinch_held;
        state.pinch_held = pinching;

        if rising_edge && state.mode == EngineMode::Morphing {
            if let Some(sample) = sample {
                state.mode = EngineMode::Exploding {
                    started_at_ms: now_ms,
                };
                transitions.push(Transition::ExplosionStarted);
                burst = Some(Burst {
                    palm: sample.palm_position,
                    intensity: config.explosion.base_intensity
                        + config.explosion.velocity_gain * sample.velocity,
                });
            }
        }

        if state.mode == EngineMode::Morphing {
            state.morph_progress += config.morph.rate;
            if state.morph_progress >= 1.0 - PROGRESS_EPSILON {
                state.morph_progress = 0.0;
                state.morph_target = state.morph_target.other();
                flipped = true;
            }
        }

        StateStep {
            state,
            transitions,
            burst,
            flipped,
        }
    }
}
