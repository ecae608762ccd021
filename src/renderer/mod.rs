//! Rendering surface
//!
//! The game loop pushes state to a [`Renderer`] once per frame. On the web
//! the surface is plain DOM: absolutely positioned pixel `div`s.

pub mod sprite;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;

use crate::sim::{GameState, RoadLines};

/// Text shown in the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub lives: u8,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            level: state.level,
            lives: state.player.lives,
        }
    }
}

/// Output surface for the game loop
pub trait Renderer {
    /// Reflect positions and HUD values
    fn render(&mut self, state: &GameState, road: &RoadLines);
    /// Short crash flash on the player car
    fn crash_feedback(&mut self, lives_left: u8);
    /// Show the game-over overlay
    fn show_game_over(&mut self, final_score: u64, high_score: u64);
}

/// Renderer that only remembers what it was told (native builds, tests)
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub hud: Hud,
    pub obstacles_drawn: usize,
    pub crashes: u32,
    pub game_over: Option<(u64, u64)>,
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, state: &GameState, _road: &RoadLines) {
        self.frames += 1;
        self.hud = Hud::from_state(state);
        self.obstacles_drawn = state.obstacles.len();
    }

    fn crash_feedback(&mut self, lives_left: u8) {
        self.crashes += 1;
        log::debug!("Crash! {} lives left", lives_left);
    }

    fn show_game_over(&mut self, final_score: u64, high_score: u64) {
        self.game_over = Some((final_score, high_score));
    }
}
