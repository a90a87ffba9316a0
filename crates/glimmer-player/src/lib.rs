//! Glimmer Player — windowed particle player library
//!
//! This crate provides the `PlayerApp` application handler, which runs the
//! particle engine once per frame with the mouse standing in for the
//! tracked hand, and `ConfigArgs` for loading config from the command line.

mod config_args;
mod indicator;
mod player_app;

pub use config_args::ConfigArgs;
pub use indicator::GestureIndicator;
pub use player_app::{run, PlayerApp};
