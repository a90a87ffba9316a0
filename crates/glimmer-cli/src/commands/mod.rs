//! CLI command implementations

pub mod play;
pub mod shape;
pub mod simulate;
