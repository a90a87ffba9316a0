//! Live per-particle buffers

use glimmer_core::{Color, ParticlesConfig, Vec3};
use rand::Rng;

/// Structure-of-arrays particle storage.
///
/// Every buffer holds exactly `len()` entries for the lifetime of the field.
/// `base_sizes` and `colors` are fixed at spawn; positions, velocities and
/// sizes are rewritten by the engine each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub sizes: Vec<f32>,
    base_sizes: Vec<f32>,
    colors: Vec<Color>,
}

impl ParticleField {
    /// Scatter `config.count` particles uniformly in a cube of side
    /// `spawn_extent` around the origin, each with a pink-to-violet tint and
    /// a random base size.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &ParticlesConfig) -> Self {
        let count = config.count;
        let half = config.spawn_extent * 0.5;

        let mut positions = Vec::with_capacity(count);
        let mut base_sizes = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push(Vec3::new(
                symmetric(rng, half),
                symmetric(rng, half),
                symmetric(rng, half),
            ));
            colors.push(palette(rng.gen::<f32>()));
            base_sizes.push(if config.size_max > config.size_min {
                rng.gen_range(config.size_min..config.size_max)
            } else {
                config.size_min
            });
        }

        Self {
            velocities: vec![Vec3::ZERO; count],
            sizes: base_sizes.clone(),
            positions,
            base_sizes,
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn base_sizes(&self) -> &[f32] {
        &self.base_sizes
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn reset_sizes(&mut self) {
        self.sizes.copy_from_slice(&self.base_sizes);
    }

    /// Put every particle back to rest at its base size
    pub fn settle(&mut self) {
        self.velocities.fill(Vec3::ZERO);
        self.reset_sizes();
    }
}

/// Tint for a particle: red stays full, green and blue rise together with
/// `mix` in [0, 1) from hot pink toward lavender.
pub fn palette(mix: f32) -> Color {
    Color::new(1.0, mix * 0.4 + 0.2, mix * 0.6 + 0.4)
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(count: usize) -> ParticlesConfig {
        ParticlesConfig {
            count,
            ..ParticlesConfig::default()
        }
    }

    #[test]
    fn spawn_fills_every_buffer() {
        let field = ParticleField::spawn(&mut StdRng::seed_from_u64(1), &config(500));
        assert_eq!(field.len(), 500);
        assert_eq!(field.velocities.len(), 500);
        assert_eq!(field.sizes.len(), 500);
        assert_eq!(field.base_sizes().len(), 500);
        assert_eq!(field.colors().len(), 500);
        assert!(field.velocities.iter().all(|v| *v == Vec3::ZERO));
        assert_eq!(field.sizes, field.base_sizes());
    }

    #[test]
    fn spawn_stays_inside_cube() {
        let cfg = config(1000);
        let field = ParticleField::spawn(&mut StdRng::seed_from_u64(2), &cfg);
        let half = cfg.spawn_extent * 0.5;
        for p in &field.positions {
            assert!(p.x.abs() <= half && p.y.abs() <= half && p.z.abs() <= half);
        }
        for s in field.base_sizes() {
            assert!(*s >= cfg.size_min && *s < cfg.size_max);
        }
    }

    #[test]
    fn palette_range() {
        let low = palette(0.0);
        let high = palette(1.0);
        assert_eq!(low, Color::new(1.0, 0.2, 0.4));
        assert!((high.g - 0.6).abs() < 1e-6);
        assert!((high.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn settle_restores_rest_state() {
        let mut field = ParticleField::spawn(&mut StdRng::seed_from_u64(3), &config(10));
        field.velocities[4] = Vec3::new(1.0, 2.0, 3.0);
        field.sizes.fill(5.0);
        field.settle();
        assert!(field.velocities.iter().all(|v| *v == Vec3::ZERO));
        assert_eq!(field.sizes, field.base_sizes());
    }
}
