//! Glimmer Engine - the particle state engine
//!
//! Owns N particles that drift between two morph targets (a heart and a
//! text field) and burst outward when the tracked hand pinches:
//!
//! - `EngineState` — the pure morph/explosion state machine
//! - `ParticleEngine` — live buffers, advanced by `step` once per frame
//! - `ParticleSnapshot` — read-only per-frame view for the renderer
//! - `GestureObserver` — "gesture active" notifications on mode changes

mod cloud;
mod config;
mod engine;
mod explosion;
mod morph;
mod observer;
mod particle;
mod snapshot;
mod state;

pub use cloud::CloudTransform;
pub use config::EngineConfig;
pub use engine::ParticleEngine;
pub use explosion::{burst, integrate_explosion, pulse_size};
pub use morph::{apply_morph, jitter};
pub use observer::{CallbackObserver, GestureObserver};
pub use particle::{palette, ParticleField};
pub use snapshot::ParticleSnapshot;
pub use state::{Burst, EngineMode, EngineState, StateStep, Transition};
