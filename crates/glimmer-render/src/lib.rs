//! Glimmer Render - wgpu renderer for the particle field
//!
//! Draws each particle as a camera-facing, additively blended round sprite
//! seen through a fixed perspective camera. The renderer only reads engine
//! snapshots; the one thing it takes from the window is its size.

mod camera;
mod context;
pub mod point_pipeline;
mod renderer;

pub use camera::Camera;
pub use context::{RenderContext, RenderError};
pub use point_pipeline::{PointInstance, PointPipeline, PointUniforms};
pub use renderer::{pack_instances, ParticleRenderer, RendererConfig};
