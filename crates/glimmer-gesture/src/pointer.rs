//! Pointer-driven gesture backend
//!
//! Stands in for a camera hand tracker: the pointer is the palm, holding the
//! button closes thumb and index together. Frames go through the same
//! `LandmarkMapper` a camera backend would use.

use crate::mapping::LandmarkMapper;
use crate::sample::HandLandmarks;
use crate::source::{FramePoll, GestureSource};
use glimmer_core::GestureConfig;

/// Default frame cadence, matching a typical 30 fps webcam
pub const POINTER_CADENCE_MS: f64 = 1000.0 / 30.0;

pub struct PointerSource {
    mapper: LandmarkMapper,
    cadence_ms: f64,
    /// Normalized pointer position, `None` while the pointer is outside the view
    pointer: Option<(f32, f32)>,
    pressed: bool,
    last_emit_ms: Option<f64>,
}

impl PointerSource {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_cadence(config, POINTER_CADENCE_MS)
    }

    pub fn with_cadence(config: GestureConfig, cadence_ms: f64) -> Self {
        Self {
            mapper: LandmarkMapper::new(config),
            cadence_ms,
            pointer: None,
            pressed: false,
            last_emit_ms: None,
        }
    }

    /// Pointer moved; coordinates normalized to the view (0..1, origin top-left)
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some((x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)));
    }

    /// Pointer left the view: the hand disappears
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Landmarks for the current pointer state
    fn landmarks(&self) -> Option<HandLandmarks> {
        // The mapper mirrors x for a user-facing camera; pre-mirror so the
        // palm follows the pointer on screen.
        let (x, y) = self.pointer?;
        let camera_x = 1.0 - x;
        Some(if self.pressed {
            HandLandmarks::pinched_at(camera_x, y)
        } else {
            HandLandmarks::open_hand_at(camera_x, y)
        })
    }
}

impl GestureSource for PointerSource {
    fn poll(&mut self, now_ms: f64) -> FramePoll {
        if let Some(last) = self.last_emit_ms {
            if now_ms - last < self.cadence_ms {
                return FramePoll::NoFrame;
            }
        }
        self.last_emit_ms = Some(now_ms);

        let hand = self.landmarks();
        match self.mapper.map(hand.as_ref()) {
            Some(sample) => FramePoll::Hand(sample),
            None => FramePoll::NoHand,
        }
    }

    fn name(&self) -> &str {
        "pointer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_at_cadence() {
        let mut source = PointerSource::with_cadence(GestureConfig::default(), 30.0);
        source.set_pointer(0.5, 0.5);
        assert!(matches!(source.poll(0.0), FramePoll::Hand(_)));
        assert_eq!(source.poll(16.0), FramePoll::NoFrame);
        assert!(matches!(source.poll(33.0), FramePoll::Hand(_)));
    }

    #[test]
    fn palm_follows_pointer_on_screen() {
        let mut source = PointerSource::new(GestureConfig::default());
        source.set_pointer(1.0, 0.0);
        let FramePoll::Hand(sample) = source.poll(0.0) else {
            panic!("expected a hand");
        };
        // Right edge of the view is +x in the scene, top edge is +y
        assert!(sample.palm_position.x > 7.0);
        assert!(sample.palm_position.y > 4.0);
    }

    #[test]
    fn press_pinches() {
        let mut source = PointerSource::with_cadence(GestureConfig::default(), 0.0);
        source.set_pointer(0.4, 0.6);
        source.set_pressed(true);
        let FramePoll::Hand(sample) = source.poll(0.0) else {
            panic!("expected a hand");
        };
        assert!(sample.is_pinching);

        source.set_pressed(false);
        let FramePoll::Hand(sample) = source.poll(1.0) else {
            panic!("expected a hand");
        };
        assert!(!sample.is_pinching);
    }

    #[test]
    fn pointer_outside_view_is_no_hand() {
        let mut source = PointerSource::new(GestureConfig::default());
        assert_eq!(source.poll(0.0), FramePoll::NoHand);
        source.set_pointer(0.5, 0.5);
        source.clear_pointer();
        assert_eq!(source.poll(100.0), FramePoll::NoHand);
    }
}
