//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. Any field can be overridden from a
//! JSON object; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("arena {width}x{height} is too small for the car sprites")]
    ArenaTooSmall { width: f32, height: f32 },
    #[error("tuning field `{field}` must be positive, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Game balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub edge_margin: f32,
    pub player_bottom_margin: f32,
    pub player_step: f32,
    pub start_lives: u8,
    pub start_speed: f32,
    pub speed_per_level: f32,
    pub pass_points: u64,
    pub level_threshold: u64,
    pub milestone_points: u64,
    pub base_spawn_interval_ms: f64,
    pub road_scroll_interval_ms: f64,
    pub road_line_spacing: f32,
    pub road_line_height: f32,
    pub engine_volume: f32,
    pub engine_rate_per_level: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            sprite_width: SPRITE_WIDTH,
            sprite_height: SPRITE_HEIGHT,
            edge_margin: EDGE_MARGIN,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_step: PLAYER_STEP,
            start_lives: START_LIVES,
            start_speed: START_SPEED,
            speed_per_level: SPEED_PER_LEVEL,
            pass_points: PASS_POINTS,
            level_threshold: LEVEL_THRESHOLD,
            milestone_points: MILESTONE_POINTS,
            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            road_scroll_interval_ms: ROAD_SCROLL_INTERVAL_MS,
            road_line_spacing: ROAD_LINE_SPACING,
            road_line_height: ROAD_LINE_HEIGHT,
            engine_volume: ENGINE_VOLUME,
            engine_rate_per_level: ENGINE_RATE_PER_LEVEL,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validated()
    }

    /// Replace the play area size (web build measures the laid-out game area)
    pub fn with_arena(mut self, width: f32, height: f32) -> Result<Self, TuningError> {
        self.arena_width = width;
        self.arena_height = height;
        self.validated()
    }

    fn validated(self) -> Result<Self, TuningError> {
        // The spawn lane must be non-empty and the car must fit vertically
        let min_width = self.sprite_width + 2.0 * self.edge_margin;
        let min_height = self.sprite_height + self.player_bottom_margin;
        if self.arena_width < min_width || self.arena_height < min_height {
            return Err(TuningError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        let positive = [
            ("start_lives", f64::from(self.start_lives)),
            ("player_step", f64::from(self.player_step)),
            ("start_speed", f64::from(self.start_speed)),
            ("pass_points", self.pass_points as f64),
        ];
        // Written as a negated comparison so NaN is rejected too
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(TuningError::InvalidValue { field, value });
        }
        Ok(self)
    }

    /// Leftmost player position
    #[inline]
    pub fn min_player_x(&self) -> f32 {
        self.edge_margin
    }

    /// Rightmost player position
    #[inline]
    pub fn max_player_x(&self) -> f32 {
        self.arena_width - self.sprite_width - self.edge_margin
    }

    /// Centered start position
    pub fn player_start_x(&self) -> f32 {
        self.arena_width / 2.0 - self.sprite_width / 2.0
    }

    /// Fixed vertical position of the player car
    pub fn player_y(&self) -> f32 {
        self.arena_height - self.sprite_height - self.player_bottom_margin
    }

    /// Obstacles appear fully hidden above the top edge
    pub fn spawn_y(&self) -> f32 {
        -self.sprite_height
    }

    /// Width of the band obstacle left edges are drawn from
    pub fn spawn_lane_width(&self) -> f32 {
        (self.arena_width - self.sprite_width - 2.0 * self.edge_margin).max(0.0)
    }

    /// Spawn cadence for a level (`base / level`)
    pub fn spawn_interval_ms(&self, level: u32) -> f64 {
        self.base_spawn_interval_ms / f64::from(level.max(1))
    }

    /// Engine loop playback rate for a level
    pub fn engine_rate(&self, level: u32) -> f32 {
        1.0 + level as f32 * self.engine_rate_per_level
    }
}
