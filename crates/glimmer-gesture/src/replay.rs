//! Scripted replay of detector frames

use crate::mapping::LandmarkMapper;
use crate::sample::HandLandmarks;
use crate::source::{FramePoll, GestureSource};
use glimmer_core::GestureConfig;
use std::collections::VecDeque;

/// Builder for a time-stamped sequence of detector frames.
///
/// Frames are spaced `cadence_ms` apart starting at `start_ms`; each step
/// appends frames covering its duration.
///
/// ```
/// use glimmer_gesture::ReplayScript;
///
/// let script = ReplayScript::new(1000.0 / 30.0)
///     .hold(0.5, 0.5, 500.0)
///     .pinch(0.5, 0.5, 200.0)
///     .gap(300.0);
/// assert!(script.len() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct ReplayScript {
    cadence_ms: f64,
    cursor_ms: f64,
    frames: Vec<(f64, Option<HandLandmarks>)>,
}

impl ReplayScript {
    pub fn new(cadence_ms: f64) -> Self {
        Self {
            cadence_ms: cadence_ms.max(f64::EPSILON),
            cursor_ms: 0.0,
            frames: Vec::new(),
        }
    }

    /// Delay the first frame until `start_ms`
    pub fn starting_at(mut self, start_ms: f64) -> Self {
        self.cursor_ms = start_ms;
        self
    }

    /// Open hand resting at normalized `(x, y)`
    pub fn hold(self, x: f32, y: f32, duration_ms: f64) -> Self {
        self.repeat(duration_ms, |_| Some(HandLandmarks::open_hand_at(x, y)))
    }

    /// Pinching hand at normalized `(x, y)`
    pub fn pinch(self, x: f32, y: f32, duration_ms: f64) -> Self {
        self.repeat(duration_ms, |_| Some(HandLandmarks::pinched_at(x, y)))
    }

    /// Hand moving linearly between two normalized positions
    pub fn sweep(
        self,
        from: (f32, f32),
        to: (f32, f32),
        pinching: bool,
        duration_ms: f64,
    ) -> Self {
        self.repeat(duration_ms, |t| {
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            Some(if pinching {
                HandLandmarks::pinched_at(x, y)
            } else {
                HandLandmarks::open_hand_at(x, y)
            })
        })
    }

    /// Frames with no hand in view
    pub fn gap(self, duration_ms: f64) -> Self {
        self.repeat(duration_ms, |_| None)
    }

    /// Append one explicit frame at the current cursor
    pub fn frame(mut self, hand: Option<HandLandmarks>) -> Self {
        self.frames.push((self.cursor_ms, hand));
        self.cursor_ms += self.cadence_ms;
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time the next appended frame would be stamped with
    pub fn end_ms(&self) -> f64 {
        self.cursor_ms
    }

    pub fn build(self, config: GestureConfig) -> ReplaySource {
        ReplaySource {
            frames: self.frames.into(),
            mapper: LandmarkMapper::new(config),
        }
    }

    fn repeat(mut self, duration_ms: f64, hand_at: impl Fn(f32) -> Option<HandLandmarks>) -> Self {
        if !duration_ms.is_finite() {
            log::warn!("ignoring replay step with non-finite duration {duration_ms}");
            return self;
        }
        let steps = (duration_ms / self.cadence_ms).round().max(1.0) as usize;
        for i in 0..steps {
            let t = if steps > 1 {
                i as f32 / (steps - 1) as f32
            } else {
                1.0
            };
            self.frames.push((self.cursor_ms, hand_at(t)));
            self.cursor_ms += self.cadence_ms;
        }
        self
    }
}

/// Replays a script against the simulation clock.
///
/// Every frame due at or before `now_ms` is mapped in order (so velocity is
/// estimated across all of them) and the newest one is delivered.
pub struct ReplaySource {
    frames: VecDeque<(f64, Option<HandLandmarks>)>,
    mapper: LandmarkMapper,
}

impl ReplaySource {
    /// Frames not yet delivered
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }
}

impl GestureSource for ReplaySource {
    fn poll(&mut self, now_ms: f64) -> FramePoll {
        let mut latest = FramePoll::NoFrame;
        while let Some(&(at_ms, _)) = self.frames.front() {
            if at_ms > now_ms {
                break;
            }
            let Some((_, hand)) = self.frames.pop_front() else {
                break;
            };
            latest = match self.mapper.map(hand.as_ref()) {
                Some(sample) => FramePoll::Hand(sample),
                None => FramePoll::NoHand,
            };
        }
        latest
    }

    fn name(&self) -> &str {
        "replay"
    }
}
