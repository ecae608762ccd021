//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod road;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_collide};
pub use road::RoadLines;
pub use spawner::spawn_obstacle;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{TickInput, handle_collision, increase_score, tick};
