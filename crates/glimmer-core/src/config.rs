//! TOML configuration
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock heart/name animation. Sections map one-to-one onto the components
//! that consume them:
//!
//! ```toml
//! [particles]
//! count = 6000
//!
//! [morph]
//! rate = 0.002
//!
//! [explosion]
//! duration_ms = 1500.0
//! damping = 0.94
//!
//! [shapes]
//! text = "MERIANA"
//! seed = 7
//! ```

use crate::error::{GlimmerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Particle buffer sizing and per-particle appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub count: usize,
    /// Edge length of the cube the particles start scattered in
    pub spawn_extent: f32,
    pub size_min: f32,
    pub size_max: f32,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: 6000,
            spawn_extent: 40.0,
            size_min: 1.0,
            size_max: 3.0,
        }
    }
}

/// Idle morph cycle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Progress added per tick; 0.002 at 60 fps gives a ~8s cycle
    pub rate: f64,
    /// Exponential smoothing factor pulling particles toward their target
    pub smoothing: f32,
    pub jitter_amplitude: f32,
    /// Radians per millisecond
    pub jitter_frequency_x: f64,
    /// Radians per millisecond
    pub jitter_frequency_y: f64,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            rate: 0.002,
            smoothing: 0.05,
            jitter_amplitude: 0.01,
            jitter_frequency_x: 0.001,
            jitter_frequency_y: 0.0012,
        }
    }
}

/// Pinch-triggered burst tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub duration_ms: f64,
    /// Per-tick velocity decay factor
    pub damping: f32,
    pub base_intensity: f32,
    /// Intensity added per unit of normalized hand velocity
    pub velocity_gain: f32,
    /// Radians per millisecond
    pub pulse_frequency: f64,
    pub pulse_amplitude: f32,
    pub pulse_base: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1500.0,
            damping: 0.94,
            base_intensity: 0.5,
            velocity_gain: 5.0,
            pulse_frequency: 0.01,
            pulse_amplitude: 2.0,
            pulse_base: 3.0,
        }
    }
}

/// Cosmetic whole-cloud rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Yaw radians per millisecond (0.005 rad per tick at 60 fps)
    pub spin_rate: f64,
    /// Radians per millisecond
    pub wobble_frequency: f64,
    /// Roll amplitude in radians
    pub wobble_amplitude: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            spin_rate: 0.0003,
            wobble_frequency: 0.0005,
            wobble_amplitude: 0.1,
        }
    }
}

/// Morph target sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub text: String,
    pub heart_scale: f32,
    /// Full width of the heart's depth range, centered on zero
    pub heart_depth: f32,
    pub raster_width: u32,
    pub raster_height: u32,
    /// Sample every Nth pixel in each axis
    pub raster_stride: u32,
    pub luminance_threshold: u8,
    /// Scene units per raster pixel
    pub glyph_scale: f32,
    /// Full width of the glyph field's depth jitter
    pub glyph_depth: f32,
    /// Fixed sampling seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            text: "MERIANA".to_string(),
            heart_scale: 0.25,
            heart_depth: 8.0,
            raster_width: 1000,
            raster_height: 300,
            raster_stride: 2,
            luminance_threshold: 128,
            glyph_scale: 0.025,
            glyph_depth: 2.0,
            seed: None,
        }
    }
}

/// Landmark to scene mapping and pinch detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb/index distance in normalized landmark units below which the hand pinches
    pub pinch_threshold: f32,
    /// Scene units per normalized unit on each axis; negative values flip the axis
    pub scale: [f32; 3],
    /// A sample older than this is treated as "no hand"
    pub stale_after_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.05,
            scale: [-15.0, -10.0, 5.0],
            stale_after_ms: 500.0,
        }
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimmerConfig {
    pub particles: ParticlesConfig,
    pub morph: MorphConfig,
    pub explosion: ExplosionConfig,
    pub cloud: CloudConfig,
    pub shapes: ShapeConfig,
    pub gesture: GestureConfig,
}

impl GlimmerConfig {
    /// Parse and validate a config document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GlimmerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            GlimmerError::ConfigParse(msg) => {
                GlimmerError::ConfigParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.particles.count == 0 {
            return Err(GlimmerError::invalid("particles.count", "must be at least 1"));
        }
        positive("particles.spawn_extent", self.particles.spawn_extent as f64)?;
        finite("particles.size_min", self.particles.size_min as f64)?;
        finite("particles.size_max", self.particles.size_max as f64)?;
        if self.particles.size_min > self.particles.size_max {
            return Err(GlimmerError::invalid(
                "particles.size_min",
                "must not exceed particles.size_max",
            ));
        }

        if !(self.morph.rate > 0.0 && self.morph.rate <= 1.0) {
            return Err(GlimmerError::invalid("morph.rate", "must be in (0, 1]"));
        }
        if !(self.morph.smoothing > 0.0 && self.morph.smoothing <= 1.0) {
            return Err(GlimmerError::invalid("morph.smoothing", "must be in (0, 1]"));
        }
        finite("morph.jitter_amplitude", self.morph.jitter_amplitude as f64)?;
        finite("morph.jitter_frequency_x", self.morph.jitter_frequency_x)?;
        finite("morph.jitter_frequency_y", self.morph.jitter_frequency_y)?;

        positive("explosion.duration_ms", self.explosion.duration_ms)?;
        if !(self.explosion.damping > 0.0 && self.explosion.damping <= 1.0) {
            return Err(GlimmerError::invalid("explosion.damping", "must be in (0, 1]"));
        }
        finite("explosion.base_intensity", self.explosion.base_intensity as f64)?;
        finite("explosion.velocity_gain", self.explosion.velocity_gain as f64)?;
        finite("explosion.pulse_frequency", self.explosion.pulse_frequency)?;
        finite("explosion.pulse_amplitude", self.explosion.pulse_amplitude as f64)?;
        finite("explosion.pulse_base", self.explosion.pulse_base as f64)?;

        finite("cloud.spin_rate", self.cloud.spin_rate)?;
        finite("cloud.wobble_frequency", self.cloud.wobble_frequency)?;
        finite("cloud.wobble_amplitude", self.cloud.wobble_amplitude as f64)?;

        positive("shapes.heart_scale", self.shapes.heart_scale as f64)?;
        finite("shapes.heart_depth", self.shapes.heart_depth as f64)?;
        positive("shapes.glyph_scale", self.shapes.glyph_scale as f64)?;
        finite("shapes.glyph_depth", self.shapes.glyph_depth as f64)?;
        if self.shapes.raster_width == 0 || self.shapes.raster_height == 0 {
            return Err(GlimmerError::invalid(
                "shapes.raster_width",
                "raster dimensions must be non-zero",
            ));
        }
        if self.shapes.raster_stride == 0 {
            return Err(GlimmerError::invalid("shapes.raster_stride", "must be at least 1"));
        }

        positive("gesture.pinch_threshold", self.gesture.pinch_threshold as f64)?;
        for (axis, factor) in ["x", "y", "z"].iter().zip(self.gesture.scale) {
            finite(&format!("gesture.scale.{axis}"), factor as f64)?;
        }
        positive("gesture.stale_after_ms", self.gesture.stale_after_ms)?;
        Ok(())
    }
}

fn finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(GlimmerError::invalid(field, "must be a finite number"));
    }
    Ok(())
}

/// NaN fails the comparison, so it is rejected along with zero and negatives
fn positive(field: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(GlimmerError::invalid(field, "must be positive and finite"));
    }
    Ok(())
}
