//! Glimmer Shapes - morph target sampling
//!
//! Produces the two fixed point clouds the particle engine morphs between:
//! - a hollow parametric heart shell
//! - a field of points sampled from rasterized text
//!
//! Sampling is random but seedable, so two runs with the same seed produce
//! identical targets while unseeded runs differ slightly each launch.

mod glyph;
mod heart;
mod target;

pub use glyph::{collect_lit_pixels, rasterize_text, sample_glyph_field, GlyphSampling};
pub use heart::{heart_curve, sample_heart};
pub use target::{MorphTarget, MorphTargets, ShapeBuffer};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build the sampling RNG: fixed seed for reproducible shapes, entropy otherwise
pub fn shape_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
