//! Glimmer Gesture - hand gesture signal adapter
//!
//! Turns hand-landmark frames into `GestureSample`s in particle space:
//! - `LandmarkMapper` — normalized camera coordinates to scene coordinates,
//!   pinch detection, and palm velocity estimation
//! - `GestureSource` — swappable backends delivering frames at their own cadence
//! - `ReplaySource` — scripted, time-stamped frames for tests and headless runs
//! - `PointerSource` — a pointer position and button standing in for a hand

mod mapping;
mod pointer;
mod replay;
mod sample;
mod source;

pub use mapping::LandmarkMapper;
pub use pointer::{PointerSource, POINTER_CADENCE_MS};
pub use replay::{ReplayScript, ReplaySource};
pub use sample::{GestureSample, HandLandmarks};
pub use source::{FramePoll, GestureSource};
