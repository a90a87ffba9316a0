//! Text glyph field: rasterize a string, then sample its lit pixels

use font8x8::legacy::BASIC_LEGACY;
use glimmer_core::{ShapeConfig, Vec3};
use image::{GrayImage, Luma};
use rand::Rng;

const GLYPH_SIZE: u32 = 8;
const LIT: Luma<u8> = Luma([255]);

/// Outcome of glyph sampling, reported alongside the points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSampling {
    /// Lit pixels found on the sampling grid
    pub candidates: usize,
}

impl GlyphSampling {
    /// True when nothing rasterized and every particle was left at the origin
    pub fn is_degraded(&self) -> bool {
        self.candidates == 0
    }
}

/// Render `text` white-on-black, centered, into a `width`x`height` bitmap.
///
/// Glyphs come from a built-in 8x8 bitmap font scaled up by whole pixels so
/// the string fills ~95% of the width or ~60% of the height, whichever is
/// tighter. Characters outside ASCII have no glyph and render blank.
pub fn rasterize_text(text: &str, width: u32, height: u32) -> GrayImage {
    let mut image = GrayImage::new(width, height);

    let columns = text.chars().count() as u32;
    if columns == 0 {
        return image;
    }

    let fit_width = (width as f32 * 0.95) / (columns * GLYPH_SIZE) as f32;
    let fit_height = (height as f32 * 0.6) / GLYPH_SIZE as f32;
    let cell = fit_width.min(fit_height).floor() as u32;
    if cell == 0 {
        return image;
    }

    let text_width = columns * GLYPH_SIZE * cell;
    let text_height = GLYPH_SIZE * cell;
    let origin_x = width.saturating_sub(text_width) / 2;
    let origin_y = height.saturating_sub(text_height) / 2;

    for (col, ch) in text.chars().enumerate() {
        let Some(glyph) = glyph_for_char(ch) else {
            continue;
        };
        let glyph_x = origin_x + col as u32 * GLYPH_SIZE * cell;
        for (row, bits) in glyph.iter().enumerate() {
            for bit in 0..GLYPH_SIZE {
                if (bits >> bit) & 0x01 == 0 {
                    continue;
                }
                let px = glyph_x + bit * cell;
                let py = origin_y + row as u32 * cell;
                fill_block(&mut image, px, py, cell);
            }
        }
    }

    image
}

/// Coordinates of every pixel brighter than `threshold` on a grid of `stride`
pub fn collect_lit_pixels(image: &GrayImage, stride: u32, threshold: u8) -> Vec<(u32, u32)> {
    let stride = stride.max(1) as usize;
    let mut lit = Vec::new();
    for y in (0..image.height()).step_by(stride) {
        for x in (0..image.width()).step_by(stride) {
            if image.get_pixel(x, y).0[0] > threshold {
                lit.push((x, y));
            }
        }
    }
    lit
}

/// Sample `count` particle targets from the rasterized `config.text`.
///
/// Each particle picks one lit pixel uniformly with replacement, converted to
/// scene units centered on the bitmap with y flipped (raster rows grow
/// downward, scene y grows upward) and given a random depth. With no lit
/// pixels all targets stay at the origin.
pub fn sample_glyph_field<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    config: &ShapeConfig,
) -> (Vec<Vec3>, GlyphSampling) {
    let image = rasterize_text(&config.text, config.raster_width, config.raster_height);
    let lit = collect_lit_pixels(&image, config.raster_stride, config.luminance_threshold);
    let sampling = GlyphSampling {
        candidates: lit.len(),
    };

    if lit.is_empty() {
        log::warn!(
            "no lit pixels rasterized for text {:?}; name shape degraded, particles stay at the origin",
            config.text
        );
        return (vec![Vec3::ZERO; count], sampling);
    }

    let center_x = config.raster_width as f32 / 2.0;
    let center_y = config.raster_height as f32 / 2.0;
    let half_depth = config.glyph_depth * 0.5;

    let points = (0..count)
        .map(|_| {
            let (x, y) = lit[rng.gen_range(0..lit.len())];
            let z = if half_depth > 0.0 {
                rng.gen_range(-half_depth..half_depth)
            } else {
                0.0
            };
            Vec3::new(
                (x as f32 - center_x) * config.glyph_scale,
                (center_y - y as f32) * config.glyph_scale,
                z,
            )
        })
        .collect();

    (points, sampling)
}

fn glyph_for_char(ch: char) -> Option<[u8; 8]> {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        Some(BASIC_LEGACY[index])
    } else {
        None
    }
}

fn fill_block(image: &mut GrayImage, x: u32, y: u32, size: u32) {
    for dy in 0..size {
        for dx in 0..size {
            let (px, py) = (x + dx, y + dy);
            if px < image.width() && py < image.height() {
                image.put_pixel(px, py, LIT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(text: &str) -> ShapeConfig {
        ShapeConfig {
            text: text.to_string(),
            ..ShapeConfig::default()
        }
    }

    #[test]
    fn rasterized_text_is_centered() {
        let image = rasterize_text("MERIANA", 1000, 300);
        let lit = collect_lit_pixels(&image, 1, 128);
        assert!(!lit.is_empty());

        let (min_x, max_x) = lit
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
        let (min_y, max_y) = lit
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let mid_x = (min_x + max_x) as f32 / 2.0;
        let mid_y = (min_y + max_y) as f32 / 2.0;
        assert!((mid_x - 500.0).abs() < 40.0, "mid_x = {mid_x}");
        assert!((mid_y - 150.0).abs() < 40.0, "mid_y = {mid_y}");
    }

    #[test]
    fn stride_thins_candidates() {
        let image = rasterize_text("HI", 200, 100);
        let dense = collect_lit_pixels(&image, 1, 128).len();
        let sparse = collect_lit_pixels(&image, 2, 128).len();
        assert!(sparse > 0);
        assert!(sparse * 3 < dense);
        for (x, y) in collect_lit_pixels(&image, 2, 128) {
            assert_eq!(x % 2, 0);
            assert_eq!(y % 2, 0);
        }
    }

    #[test]
    fn field_points_are_within_raster_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = config("MERIANA");
        let (points, sampling) = sample_glyph_field(&mut rng, 1000, &cfg);
        assert_eq!(points.len(), 1000);
        assert!(!sampling.is_degraded());

        let half_w = cfg.raster_width as f32 / 2.0 * cfg.glyph_scale;
        let half_h = cfg.raster_height as f32 / 2.0 * cfg.glyph_scale;
        for p in &points {
            assert!(p.x.abs() <= half_w);
            assert!(p.y.abs() <= half_h);
            assert!(p.z >= -1.0 && p.z < 1.0);
        }
    }

    #[test]
    fn raster_rows_flip_to_scene_up() {
        // "T" has its bar on top: the densest glyph rows must land at positive y
        let mut rng = StdRng::seed_from_u64(4);
        let (points, _) = sample_glyph_field(&mut rng, 4000, &config("T"));
        let upper = points.iter().filter(|p| p.y > 0.0).count();
        let lower = points.len() - upper;
        assert!(upper > lower, "upper = {upper}, lower = {lower}");
    }

    #[test]
    fn unsupported_text_degrades_to_origin() {
        let mut rng = StdRng::seed_from_u64(5);
        let (points, sampling) = sample_glyph_field(&mut rng, 64, &config("ハート"));
        assert!(sampling.is_degraded());
        assert_eq!(points.len(), 64);
        assert!(points.iter().all(|p| *p == Vec3::ZERO));
    }

    #[test]
    fn empty_text_degrades_to_origin() {
        let mut rng = StdRng::seed_from_u64(6);
        let (points, sampling) = sample_glyph_field(&mut rng, 8, &config(""));
        assert_eq!(sampling.candidates, 0);
        assert!(points.iter().all(|p| *p == Vec3::ZERO));
    }
}
