//! Read-only view of the engine after a tick

use crate::cloud::CloudTransform;
use crate::state::{EngineMode, Transition};
use glimmer_core::{Color, Vec3};
use glimmer_shapes::MorphTarget;
use serde::Serialize;

/// Borrowed per-particle buffers plus the state the renderer or a test
/// needs. All three buffers always have the same length.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleSnapshot<'a> {
    pub positions: &'a [Vec3],
    pub sizes: &'a [f32],
    /// Fixed at startup
    pub colors: &'a [Color],
    pub cloud: CloudTransform,
    pub mode: EngineMode,
    pub morph_target: MorphTarget,
    pub morph_progress: f64,
    /// Mode changes taken on this tick, in order
    pub transitions: &'a [Transition],
}

impl ParticleSnapshot<'_> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether the explosion is running, as shown by the presentation layer
    pub fn gesture_active(&self) -> bool {
        self.mode.is_exploding()
    }

    /// Axis-aligned bounds of the positions, `None` for an empty field
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| {
            (
                Vec3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vec3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}
