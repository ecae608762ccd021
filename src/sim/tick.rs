//! Per-frame simulation tick
//!
//! Order within a tick: input, then obstacle movement, then pass/collision
//! checks. One tick runs per animation frame.

use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// Advance the run by one frame
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    move_player(state, input, tuning);
    advance_obstacles(state, tuning);
}

/// Step the player car; holding both directions cancels out
fn move_player(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let min_x = tuning.min_player_x();
    let max_x = tuning.max_player_x();
    let player = &mut state.player;

    if input.move_left && player.x > min_x {
        player.x = (player.x - tuning.player_step).max(min_x);
    }
    if input.move_right && player.x < max_x {
        player.x = (player.x + tuning.player_step).min(max_x);
    }
}

fn advance_obstacles(state: &mut GameState, tuning: &Tuning) {
    let player_rect = state.player.rect(tuning);
    let obstacles = std::mem::take(&mut state.obstacles);
    let mut survivors = Vec::with_capacity(obstacles.len());
    let mut pending = obstacles.into_iter();

    for mut obstacle in pending.by_ref() {
        obstacle.pos.y += state.speed;

        if obstacle.pos.y > tuning.arena_height {
            state.events.push(GameEvent::ObstaclePassed { id: obstacle.id });
            increase_score(state, tuning.pass_points, tuning);
        } else if obstacle.rect(tuning).overlaps(&player_rect) {
            handle_collision(state, obstacle.id);
            if state.phase == GamePhase::GameOver {
                break;
            }
        } else {
            survivors.push(obstacle);
        }
    }

    // Obstacles not reached before the run ended stay frozen where they are
    survivors.extend(pending);
    state.obstacles = survivors;
}

/// Add points, emit milestone cues, and promote at most one level
pub fn increase_score(state: &mut GameState, points: u64, tuning: &Tuning) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.score += points;

    if tuning.milestone_points > 0 && state.score % tuning.milestone_points == 0 {
        state.events.push(GameEvent::ScoreMilestone { score: state.score });
    }

    // Single promotion per call, even if several thresholds were crossed
    if state.score >= u64::from(state.level) * tuning.level_threshold {
        state.level += 1;
        state.speed += tuning.speed_per_level;
        state.spawn_interval_ms = tuning.spawn_interval_ms(state.level);
        state.events.push(GameEvent::LevelUp {
            level: state.level,
            speed: state.speed,
            spawn_interval_ms: state.spawn_interval_ms,
        });
    }
}

/// Take a life; the last one ends the run
pub fn handle_collision(state: &mut GameState, obstacle_id: u32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.player.lives = state.player.lives.saturating_sub(1);
    state.events.push(GameEvent::Crash {
        id: obstacle_id,
        lives_left: state.player.lives,
    });

    if state.player.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
    }
}
