//! Glimmer Core - Foundational types for the Glimmer particle engine
//!
//! This crate provides the types that all other Glimmer crates depend on:
//! - `Vec3`, `Color` - Spatial and color types
//! - `GlimmerConfig` - TOML configuration with per-component sections
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{
    CloudConfig, ExplosionConfig, GestureConfig, GlimmerConfig, MorphConfig, ParticlesConfig,
    ShapeConfig,
};
pub use error::{GlimmerError, Result};
pub use types::{mat4_mul, rotation_y, rotation_z, Color, Vec3, MAT4_IDENTITY};
