//! Pixel Racer - A pixel-art arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring)
//! - `game`: Loop controller wiring the simulation to its collaborators
//! - `schedule`: Frame-driven interval timers (spawner, road scroller)
//! - `renderer`: Rendering surface abstraction (DOM on web)
//! - `audio`: Sound cues and engine loop
//! - `platform`: Browser/native platform abstraction (input)
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod color;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod schedule;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play area defaults (overridden by the laid-out game area on web)
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Car sprites are 4x8 pixels of 8px each
    pub const SPRITE_PIXEL: f32 = 8.0;
    pub const SPRITE_COLS: usize = 4;
    pub const SPRITE_ROWS: usize = 8;
    pub const SPRITE_WIDTH: f32 = SPRITE_PIXEL * SPRITE_COLS as f32;
    pub const SPRITE_HEIGHT: f32 = SPRITE_PIXEL * SPRITE_ROWS as f32;

    /// Gap kept between the cars and the road edges
    pub const EDGE_MARGIN: f32 = 20.0;
    /// Gap between the player car and the bottom of the play area
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    /// Horizontal step per tick while a direction key is held
    pub const PLAYER_STEP: f32 = 5.0;

    pub const START_LIVES: u8 = 3;
    pub const START_SPEED: f32 = 5.0;
    pub const SPEED_PER_LEVEL: f32 = 1.0;

    /// Points for an obstacle leaving the bottom edge
    pub const PASS_POINTS: u64 = 10;
    /// Level N ends once score reaches N * LEVEL_THRESHOLD
    pub const LEVEL_THRESHOLD: u64 = 100;
    /// Milestone cue plays on every exact multiple of this
    pub const MILESTONE_POINTS: u64 = 100;

    /// Spawn cadence at level 1; divided by level afterwards
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Road line scroll cadence
    pub const ROAD_SCROLL_INTERVAL_MS: f64 = 20.0;
    pub const ROAD_LINE_SPACING: f32 = 60.0;
    pub const ROAD_LINE_HEIGHT: f32 = 8.0;

    pub const ENGINE_VOLUME: f32 = 0.3;
    pub const ENGINE_RATE_PER_LEVEL: f32 = 0.1;

    /// Longest frame delta fed to the timers (ms)
    pub const MAX_FRAME_DT_MS: f64 = 100.0;
    /// Maximum timer firings per frame to prevent a spawn flood after a stall
    pub const MAX_CATCHUP: u32 = 8;
}
