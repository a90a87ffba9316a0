//! Morphing integration: smooth pull toward the active shape plus idle jitter

use crate::particle::ParticleField;
use glimmer_core::{MorphConfig, Vec3};

/// Pull every particle toward `targets[i] + offset` by the smoothing factor,
/// add the time-driven jitter, and reset sizes to their base values.
///
/// `targets` must hold one point per particle.
pub fn apply_morph(
    field: &mut ParticleField,
    targets: &[Vec3],
    offset: Vec3,
    now_ms: f64,
    config: &MorphConfig,
) {
    debug_assert_eq!(targets.len(), field.len());
    let alpha = config.smoothing;

    for (i, (position, target)) in field.positions.iter_mut().zip(targets).enumerate() {
        let goal = *target + offset;
        *position += (goal - *position) * alpha;

        let (dx, dy) = jitter(i, now_ms, config);
        position.x += dx;
        position.y += dy;
    }

    field.reset_sizes();
}

/// Per-particle sinusoidal drift, phase-offset by index
pub fn jitter(index: usize, now_ms: f64, config: &MorphConfig) -> (f32, f32) {
    let phase = index as f64;
    let dx = (now_ms * config.jitter_frequency_x + phase).sin() as f32;
    let dy = (now_ms * config.jitter_frequency_y + phase).cos() as f32;
    (dx * config.jitter_amplitude, dy * config.jitter_amplitude)
}
