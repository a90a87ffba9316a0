//! Shape command — renders a morph target's XY projection to a PNG

use anyhow::{bail, Context, Result};
use glimmer_core::{GlimmerConfig, Vec3};
use glimmer_shapes::{shape_rng, MorphTarget, MorphTargets};
use image::{GrayImage, Luma};
use std::path::PathBuf;

/// Fraction of the image left empty around the shape on each side
const MARGIN: f32 = 0.05;

pub struct ShapeArgs {
    pub target: MorphTarget,
    pub out: PathBuf,
    pub width: u32,
    pub height: u32,
}

pub fn run(config: &GlimmerConfig, args: ShapeArgs) -> Result<()> {
    let image = render_shape(config, &args)?;
    image
        .save(&args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    println!(
        "Wrote {} preview ({}x{}) to {}",
        args.target,
        args.width,
        args.height,
        args.out.display()
    );
    Ok(())
}

/// Sample the requested target and plot every point as a white pixel
pub fn render_shape(config: &GlimmerConfig, args: &ShapeArgs) -> Result<GrayImage> {
    if args.width == 0 || args.height == 0 {
        bail!("image size must be non-zero, got {}x{}", args.width, args.height);
    }

    let mut rng = shape_rng(config.shapes.seed);
    let targets = MorphTargets::sample(&mut rng, config.particles.count, &config.shapes);
    let points = targets.get(args.target).points();
    log::info!("plotting {} {} points", points.len(), args.target);

    let mut image = GrayImage::new(args.width, args.height);
    let Some((min, max)) = xy_bounds(points) else {
        return Ok(image);
    };

    // One uniform scale keeps the aspect ratio of the shape
    let span_x = (max.0 - min.0).max(f32::EPSILON);
    let span_y = (max.1 - min.1).max(f32::EPSILON);
    let usable_w = args.width as f32 * (1.0 - 2.0 * MARGIN);
    let usable_h = args.height as f32 * (1.0 - 2.0 * MARGIN);
    let scale = (usable_w / span_x).min(usable_h / span_y);
    let center = ((min.0 + max.0) * 0.5, (min.1 + max.1) * 0.5);

    let half_w = args.width as f32 * 0.5;
    let half_h = args.height as f32 * 0.5;
    for p in points {
        let px = half_w + (p.x - center.0) * scale;
        // Image rows grow downward, scene Y grows upward
        let py = half_h - (p.y - center.1) * scale;
        let (x, y) = (px.floor() as i64, py.floor() as i64);
        if x >= 0 && y >= 0 && (x as u32) < args.width && (y as u32) < args.height {
            image.put_pixel(x as u32, y as u32, Luma([255]));
        }
    }

    Ok(image)
}

fn xy_bounds(points: &[Vec3]) -> Option<((f32, f32), (f32, f32))> {
    let first = points.first()?;
    let mut min = (first.x, first.y);
    let mut max = min;
    for p in &points[1..] {
        min = (min.0.min(p.x), min.1.min(p.y));
        max = (max.0.max(p.x), max.1.max(p.y));
    }
    Some((min, max))
}
