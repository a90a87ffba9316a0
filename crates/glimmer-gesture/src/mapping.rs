//! Landmark to particle-space mapping

use crate::sample::{GestureSample, HandLandmarks};
use glimmer_core::{GestureConfig, Vec3};

/// Converts detector frames into gesture samples.
///
/// Scene position = `((p.x - 0.5) * sx, (p.y - 0.5) * sy, p.z * sz)` where
/// `(sx, sy, sz)` is `GestureConfig::scale`, (-15, -10, 5) by default: the
/// frame is re-centered, mirrored horizontally (the camera faces the user),
/// flipped vertically (image rows grow downward), and scaled to roughly fill
/// the view at the default camera distance.
///
/// Pinch distance and velocity are measured before scaling, in normalized
/// units, and are reported that way.
pub struct LandmarkMapper {
    config: GestureConfig,
    /// Normalized palm xy of the previous delivered frame, if the hand was visible
    last_palm: Option<(f32, f32)>,
}

impl LandmarkMapper {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            last_palm: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Map one detector frame. `None` (no hand in view) clears the velocity
    /// history so the next visible hand starts from zero velocity.
    pub fn map(&mut self, frame: Option<&HandLandmarks>) -> Option<GestureSample> {
        let Some(hand) = frame else {
            if self.last_palm.take().is_some() {
                log::debug!("hand left view, velocity history reset");
            }
            return None;
        };

        let palm = hand.palm();
        let pinch_distance = hand.pinch_distance();

        let velocity = match self.last_palm {
            Some((px, py)) => {
                let (vx, vy) = (palm.x - px, palm.y - py);
                (vx * vx + vy * vy).sqrt()
            }
            None => 0.0,
        };
        self.last_palm = Some((palm.x, palm.y));

        Some(GestureSample {
            palm_position: self.to_scene(palm),
            index_tip: self.to_scene(hand.index_tip),
            thumb_tip: self.to_scene(hand.thumb_tip),
            pinch_distance,
            velocity,
            is_pinching: pinch_distance < self.config.pinch_threshold,
        })
    }

    /// Forget the previous palm position
    pub fn reset(&mut self) {
        self.last_palm = None;
    }

    /// Normalized landmark coordinates to scene coordinates
    pub fn to_scene(&self, p: Vec3) -> Vec3 {
        let [sx, sy, sz] = self.config.scale;
        Vec3::new((p.x - 0.5) * sx, (p.y - 0.5) * sy, p.z * sz)
    }
}
