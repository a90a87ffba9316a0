//! Play command — opens the interactive particle window

use anyhow::Result;
use glimmer_core::GlimmerConfig;

pub fn run(config: &GlimmerConfig, fullscreen: bool) -> Result<()> {
    println!("Particles: {}", config.particles.count);
    println!("Name: {}", config.shapes.text);
    println!();
    println!("Controls:");
    println!("  Mouse       - Move the hand");
    println!("  Left button - Pinch (trigger the burst)");
    println!("  Escape      - Exit");
    println!("  F11         - Toggle fullscreen");

    glimmer_player::run(config, fullscreen)
}
