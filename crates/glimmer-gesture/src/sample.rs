//! Gesture data types

use glimmer_core::Vec3;
use serde::{Deserialize, Serialize};

/// One detected hand, already mapped into particle space.
///
/// Positions are scene units. `pinch_distance` and `velocity` stay in
/// normalized landmark units (fractions of the camera frame) so thresholds
/// and gains are independent of the scene scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub palm_position: Vec3,
    pub index_tip: Vec3,
    pub thumb_tip: Vec3,
    pub pinch_distance: f32,
    /// 2D palm displacement since the previous delivered sample
    pub velocity: f32,
    pub is_pinching: bool,
}

impl GestureSample {
    /// A hand resting at `palm` with fingers apart
    pub fn open_at(palm: Vec3) -> Self {
        Self {
            palm_position: palm,
            index_tip: palm,
            thumb_tip: palm,
            pinch_distance: 1.0,
            velocity: 0.0,
            is_pinching: false,
        }
    }

    /// A pinching hand at `palm` moving at `velocity`
    pub fn pinch_at(palm: Vec3, velocity: f32) -> Self {
        Self {
            pinch_distance: 0.0,
            velocity,
            is_pinching: true,
            ..Self::open_at(palm)
        }
    }
}

/// The raw landmarks the adapter needs from a hand detector.
///
/// Coordinates are normalized to the camera frame: x and y in 0..1 with the
/// origin at the top-left, z is relative depth (negative toward the camera).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub wrist: Vec3,
    /// Base of the middle finger; averaged with the wrist for the palm center
    pub middle_base: Vec3,
    pub thumb_tip: Vec3,
    pub index_tip: Vec3,
}

impl HandLandmarks {
    /// Synthetic open hand with its palm centered at normalized `(x, y)`
    pub fn open_hand_at(x: f32, y: f32) -> Self {
        Self {
            wrist: Vec3::new(x, y + 0.05, 0.0),
            middle_base: Vec3::new(x, y - 0.05, 0.0),
            thumb_tip: Vec3::new(x - 0.06, y - 0.08, 0.0),
            index_tip: Vec3::new(x + 0.06, y - 0.12, 0.0),
        }
    }

    /// Synthetic hand at normalized `(x, y)` with thumb and index touching
    pub fn pinched_at(x: f32, y: f32) -> Self {
        let tip = Vec3::new(x + 0.02, y - 0.1, 0.0);
        Self {
            thumb_tip: tip,
            index_tip: tip,
            ..Self::open_hand_at(x, y)
        }
    }

    /// Palm center in normalized coordinates
    pub fn palm(&self) -> Vec3 {
        (self.wrist + self.middle_base) * 0.5
    }

    /// 3D thumb-to-index distance in normalized coordinates
    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip.distance(&self.index_tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palm_is_wrist_middle_midpoint() {
        let hand = HandLandmarks::open_hand_at(0.3, 0.6);
        let palm = hand.palm();
        assert!((palm.x - 0.3).abs() < 1e-6);
        assert!((palm.y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn synthetic_hands_straddle_default_threshold() {
        assert!(HandLandmarks::open_hand_at(0.5, 0.5).pinch_distance() > 0.05);
        assert!(HandLandmarks::pinched_at(0.5, 0.5).pinch_distance() < 0.05);
    }
}
