//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard)
//! - Storage (see `persistence`)

pub mod input;

pub use input::{InputState, Key};
