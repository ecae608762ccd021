//! Obstacle spawning

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle};
use crate::color::Color;
use crate::tuning::Tuning;

/// Drop one obstacle in above the play area at a random lane and color.
///
/// Returns the new obstacle's ID, or `None` once the run is over.
pub fn spawn_obstacle(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let lane = tuning.spawn_lane_width();
    let x = (rng.random::<f32>() * lane).floor() + tuning.edge_margin;
    let color = Color::from_rgb(rng.random_range(0..Color::MAX));

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, tuning.spawn_y()),
        color,
    });
    state.events.push(GameEvent::ObstacleSpawned { id });
    log::debug!("Spawned obstacle {} at x={} ({})", id, x, color);

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::handle_collision;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_lane() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..500 {
            spawn_obstacle(&mut state, &tuning, &mut rng);
        }

        assert_eq!(state.obstacles.len(), 500);
        for obstacle in &state.obstacles {
            assert!(obstacle.pos.x >= tuning.edge_margin);
            assert!(obstacle.pos.x <= tuning.arena_width - 53.0);
            assert_eq!(obstacle.pos.x, obstacle.pos.x.floor());
            assert_eq!(obstacle.pos.y, -64.0);
            assert!(obstacle.color.rgb() <= Color::MAX);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let tuning = Tuning::default();
        let mut a = GameState::new(&tuning);
        let mut b = GameState::new(&tuning);
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);

        for _ in 0..10 {
            spawn_obstacle(&mut a, &tuning, &mut rng_a);
            spawn_obstacle(&mut b, &tuning, &mut rng_b);
        }

        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.pos, ob.pos);
            assert_eq!(oa.color, ob.color);
        }
    }

    #[test]
    fn test_no_spawn_after_game_over() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.player.lives = 1;
        handle_collision(&mut state, 0);

        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(spawn_obstacle(&mut state, &tuning, &mut rng), None);
        assert!(state.obstacles.is_empty());
    }
}
