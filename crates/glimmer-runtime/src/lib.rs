//! Glimmer Runtime - render loop building blocks
//!
//! - `SimClock` — explicit simulation clock in milliseconds, advanced by hand
//! - `FrameClock` — drives a `SimClock` from wall-clock time once per frame
//! - `GestureLatch` — holds the latest gesture sample between detector frames
//! - `EngineEvent` / `EventBus` — notifications from the engine to the shell

mod clock;
mod event;
mod event_bus;
mod latch;

pub use clock::{FrameClock, SimClock};
pub use event::EngineEvent;
pub use event_bus::EventBus;
pub use latch::GestureLatch;
