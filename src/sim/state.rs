//! Game state and core simulation types

use glam::Vec2;

use super::collision::Rect;
use crate::color::Color;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; terminal until the page is reloaded
    GameOver,
}

/// Things that happened during a tick, drained by the loop controller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Obstacle spawned above the play area
    ObstacleSpawned { id: u32 },
    /// Obstacle left the bottom edge
    ObstaclePassed { id: u32 },
    /// Obstacle hit the player
    Crash { id: u32, lives_left: u8 },
    /// Score landed on an exact milestone multiple
    ScoreMilestone { score: u64 },
    /// Level increased; spawner cadence must follow
    LevelUp {
        level: u32,
        speed: f32,
        spawn_interval_ms: f64,
    },
    /// Last life lost
    GameOver { final_score: u64 },
}

/// The player's car
#[derive(Debug, Clone)]
pub struct Player {
    /// Left edge (pixels from the play-area origin)
    pub x: f32,
    /// Top edge, fixed for the whole run
    pub y: f32,
    pub lives: u8,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_start_x(),
            y: tuning.player_y(),
            lives: tuning.start_lives,
        }
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::from_pos_size(
            Vec2::new(self.x, self.y),
            Vec2::new(tuning.sprite_width, tuning.sprite_height),
        )
    }
}

/// A falling obstacle car
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner; only `y` changes after spawning
    pub pos: Vec2,
    pub color: Color,
}

impl Obstacle {
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::from_pos_size(
            self.pos,
            Vec2::new(tuning.sprite_width, tuning.sprite_height),
        )
    }
}

/// Complete run state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    /// Live obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub level: u32,
    /// Pixels obstacles fall per tick
    pub speed: f32,
    /// Current spawner cadence
    pub spawn_interval_ms: f64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events for the controller
    pub events: Vec<GameEvent>,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: Player::new(tuning),
            obstacles: Vec::new(),
            score: 0,
            level: 1,
            speed: tuning.start_speed,
            spawn_interval_ms: tuning.spawn_interval_ms(1),
            phase: GamePhase::Running,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
