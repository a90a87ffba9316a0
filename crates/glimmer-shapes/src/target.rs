//! Morph targets: the immutable shape buffers the engine cycles between

use crate::glyph::{sample_glyph_field, GlyphSampling};
use crate::heart::sample_heart;
use glimmer_core::{ShapeConfig, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which shape the idle cloud is currently pulled toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphTarget {
    Heart,
    Name,
}

impl MorphTarget {
    /// The shape the cycle flips to next
    pub fn other(self) -> Self {
        match self {
            MorphTarget::Heart => MorphTarget::Name,
            MorphTarget::Name => MorphTarget::Heart,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MorphTarget::Heart => "heart",
            MorphTarget::Name => "name",
        }
    }
}

impl fmt::Display for MorphTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed array of target positions, one per particle.
///
/// Cheap to clone; the points are shared and never mutated after sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBuffer {
    points: Arc<[Vec3]>,
}

impl ShapeBuffer {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points: points.into(),
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Both morph targets, sampled once at startup
#[derive(Debug, Clone)]
pub struct MorphTargets {
    heart: ShapeBuffer,
    name: ShapeBuffer,
    glyph: GlyphSampling,
}

impl MorphTargets {
    /// Sample the heart shell and the text field for `count` particles
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, count: usize, config: &ShapeConfig) -> Self {
        let heart = sample_heart(rng, count, config.heart_scale, config.heart_depth);
        let (name, glyph) = sample_glyph_field(rng, count, config);

        log::info!(
            "sampled morph targets: {} particles, {} glyph candidates for {:?}",
            count,
            glyph.candidates,
            config.text
        );

        Self {
            heart: ShapeBuffer::new(heart),
            name: ShapeBuffer::new(name),
            glyph,
        }
    }

    /// Build from precomputed buffers of equal length
    pub fn from_buffers(heart: ShapeBuffer, name: ShapeBuffer) -> Option<Self> {
        if heart.len() != name.len() {
            return None;
        }
        let candidates = if name.points().iter().all(|p| *p == Vec3::ZERO) {
            0
        } else {
            name.len()
        };
        Some(Self {
            heart,
            name,
            glyph: GlyphSampling { candidates },
        })
    }

    pub fn get(&self, target: MorphTarget) -> &ShapeBuffer {
        match target {
            MorphTarget::Heart => &self.heart,
            MorphTarget::Name => &self.name,
        }
    }

    /// Particles per buffer
    pub fn len(&self) -> usize {
        self.heart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heart.is_empty()
    }

    pub fn glyph_sampling(&self) -> GlyphSampling {
        self.glyph
    }
}
