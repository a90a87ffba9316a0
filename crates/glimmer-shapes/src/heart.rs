//! Parametric heart shell

use glimmer_core::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Point on the classic heart curve for parameter `t`, unscaled
/// (x spans roughly ±16, y roughly -17..12)
pub fn heart_curve(t: f32) -> (f32, f32) {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    (x, y)
}

/// Sample `count` points on the heart curve, each pushed to an independent
/// random depth in `[-depth/2, depth/2)`, then scaled uniformly by `scale`.
pub fn sample_heart<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    scale: f32,
    depth: f32,
) -> Vec<Vec3> {
    let half_depth = depth * 0.5;
    (0..count)
        .map(|_| {
            let t = rng.gen_range(0.0..TAU);
            let (x, y) = heart_curve(t);
            let z = if half_depth > 0.0 {
                rng.gen_range(-half_depth..half_depth)
            } else {
                0.0
            };
            Vec3::new(x, y, z) * scale
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn curve_landmarks() {
        // Top cusp at t = 0 sits between the lobes
        let (x, y) = heart_curve(0.0);
        assert!(x.abs() < 1e-5);
        assert!((y - 5.0).abs() < 1e-4);

        // Bottom tip at t = pi
        let (x, y) = heart_curve(std::f32::consts::PI);
        assert!(x.abs() < 1e-3);
        assert!((y + 17.0).abs() < 1e-3);
    }

    #[test]
    fn sample_bounds_after_scaling() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = sample_heart(&mut rng, 2000, 0.25, 8.0);
        assert_eq!(points.len(), 2000);
        for p in &points {
            assert!(p.x.abs() <= 16.0 * 0.25 + 1e-4);
            assert!(p.y >= -17.0 * 0.25 - 1e-4 && p.y <= 13.0 * 0.25);
            assert!(p.z >= -1.0 && p.z < 1.0);
        }
    }

    #[test]
    fn points_lie_on_the_shell() {
        // Every sample's xy projection must be on the curve, not inside it
        let mut rng = StdRng::seed_from_u64(2);
        let points = sample_heart(&mut rng, 50, 1.0, 0.0);
        for p in &points {
            let on_curve = (0..20_000).any(|k| {
                let t = k as f32 / 20_000.0 * TAU;
                let (x, y) = heart_curve(t);
                (x - p.x).abs() < 0.05 && (y - p.y).abs() < 0.05
            });
            assert!(on_curve, "{p:?} is off the curve");
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn same_seed_same_shape() {
        let a = sample_heart(&mut StdRng::seed_from_u64(9), 100, 0.25, 8.0);
        let b = sample_heart(&mut StdRng::seed_from_u64(9), 100, 0.25, 8.0);
        assert_eq!(a, b);
    }
}
