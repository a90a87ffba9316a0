//! Explosion burst and damped flight

use crate::particle::ParticleField;
use glimmer_core::{ExplosionConfig, Vec3};
use rand::Rng;

/// Below this distance from the palm the radial direction is undefined
const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Give every particle an outward velocity away from `palm`.
///
/// Speed is `intensity * (u + 0.5)` with `u` uniform in [0, 1) per particle.
/// A particle sitting on the palm divides by 1 instead of its distance, so
/// it gets a tiny (possibly zero) but always finite velocity.
pub fn burst<R: Rng + ?Sized>(field: &mut ParticleField, palm: Vec3, intensity: f32, rng: &mut R) {
    for (position, velocity) in field.positions.iter().zip(field.velocities.iter_mut()) {
        let offset = *position - palm;
        let distance = offset.length();
        let denominator = if distance > MIN_DIRECTION_LENGTH {
            distance
        } else {
            1.0
        };
        let direction = offset * (1.0 / denominator);
        let speed = intensity * (rng.gen::<f32>() + 0.5);
        *velocity = direction * speed;
    }
}

/// Advance one exploding tick: move by velocity, then damp it
pub fn integrate_explosion(field: &mut ParticleField, damping: f32) {
    for (position, velocity) in field.positions.iter_mut().zip(field.velocities.iter_mut()) {
        *position += *velocity;
        *velocity *= damping;
    }
}

/// Shared glow size for every particle while exploding
pub fn pulse_size(now_ms: f64, config: &ExplosionConfig) -> f32 {
    (now_ms * config.pulse_frequency).sin() as f32 * config.pulse_amplitude + config.pulse_base
}
