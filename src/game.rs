//! Game loop controller
//!
//! Owns the run state, the timers and the collaborators. The platform calls
//! [`Game::frame`] once per animation frame and stops rescheduling as soon as
//! it returns `false`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioPlayer, SoundEffect};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::InputState;
use crate::renderer::Renderer;
use crate::schedule::Schedule;
use crate::sim::{GameEvent, GameState, RoadLines, spawn_obstacle, tick};
use crate::tuning::Tuning;

/// Obstacle bookkeeping for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub spawned: u32,
    pub passed: u32,
    pub crashed: u32,
}

pub struct Game<R, A, S> {
    state: GameState,
    tuning: Tuning,
    high_score: HighScore,
    input: InputState,
    schedule: Schedule,
    road: RoadLines,
    rng: Pcg32,
    stats: RunStats,
    renderer: R,
    audio: A,
    store: S,
}

impl<R, A, S> Game<R, A, S>
where
    R: Renderer,
    A: AudioPlayer,
    S: KeyValueStore,
{
    /// Start a run: load the high score and start the engine sound
    pub fn new(seed: u64, tuning: Tuning, renderer: R, mut audio: A, store: S) -> Self {
        let high_score = HighScore::load(&store);
        audio.start_engine(tuning.engine_volume);

        log::info!(
            "New run: seed {}, arena {}x{}, best {}",
            seed,
            tuning.arena_width,
            tuning.arena_height,
            high_score.best()
        );

        Self {
            state: GameState::new(&tuning),
            schedule: Schedule::new(&tuning),
            road: RoadLines::new(&tuning),
            tuning,
            high_score,
            input: InputState::default(),
            rng: Pcg32::seed_from_u64(seed),
            stats: RunStats::default(),
            renderer,
            audio,
            store,
        }
    }

    /// Key pressed. Returns true if the game uses the key.
    pub fn key_down(&mut self, name: &str) -> bool {
        let used = self.input.apply(name, true);
        if used {
            self.audio.resume();
        }
        used
    }

    /// Key released. Returns true if the game uses the key.
    pub fn key_up(&mut self, name: &str) -> bool {
        self.input.apply(name, false)
    }

    /// Run one animation frame; `dt_ms` is the time since the previous one.
    ///
    /// Returns whether another frame should be scheduled.
    pub fn frame(&mut self, dt_ms: f64) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let firings = self.schedule.advance(dt_ms);
        for _ in 0..firings.road_scrolls {
            self.road.scroll(self.state.speed, &self.tuning);
        }
        for _ in 0..firings.spawns {
            spawn_obstacle(&mut self.state, &self.tuning, &mut self.rng);
        }

        tick(&mut self.state, &self.input.tick_input(), &self.tuning);
        self.dispatch_events();
        self.renderer.render(&self.state, &self.road);

        self.state.is_running()
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ObstacleSpawned { .. } => self.stats.spawned += 1,
                GameEvent::ObstaclePassed { .. } => self.stats.passed += 1,
                GameEvent::Crash { lives_left, .. } => {
                    self.stats.crashed += 1;
                    self.audio.play(SoundEffect::Crash);
                    self.renderer.crash_feedback(lives_left);
                }
                GameEvent::ScoreMilestone { .. } => self.audio.play(SoundEffect::Milestone),
                GameEvent::LevelUp {
                    level,
                    speed,
                    spawn_interval_ms,
                } => {
                    log::info!(
                        "Level {}: speed {}, spawning every {:.0}ms",
                        level,
                        speed,
                        spawn_interval_ms
                    );
                    self.schedule.spawner.reset(spawn_interval_ms);
                    self.audio.set_engine_rate(self.tuning.engine_rate(level));
                }
                GameEvent::GameOver { final_score } => self.end_run(final_score),
            }
        }
    }

    /// Stop everything, record the high score and show the overlay
    fn end_run(&mut self, final_score: u64) {
        self.schedule.stop();
        self.audio.stop_engine();

        if self.high_score.submit(final_score) {
            if let Err(e) = self.high_score.save(&mut self.store) {
                log::warn!("Could not save high score: {}", e);
            }
        }

        self.renderer
            .show_game_over(final_score, self.high_score.best());
        log::info!(
            "Game over: score {}, level {}, best {}",
            final_score,
            self.state.level,
            self.high_score.best()
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn road(&self) -> &RoadLines {
        &self.road
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::persistence::MemoryStore;
    use crate::renderer::HeadlessRenderer;
    use crate::sim::{GamePhase, Obstacle};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Audio double that records every call
    #[derive(Debug, Default)]
    struct RecordingAudio {
        played: Vec<SoundEffect>,
        engine_on: bool,
        engine_volume: f32,
        engine_rate: f32,
    }

    impl AudioPlayer for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }

        fn start_engine(&mut self, volume: f32) {
            self.engine_on = true;
            self.engine_volume = volume;
            self.engine_rate = 1.0;
        }

        fn set_engine_rate(&mut self, rate: f32) {
            self.engine_rate = rate;
        }

        fn stop_engine(&mut self) {
            self.engine_on = false;
        }
    }

    type TestGame = Game<HeadlessRenderer, RecordingAudio, MemoryStore>;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn new_game(store: MemoryStore) -> TestGame {
        Game::new(
            1234,
            Tuning::default(),
            HeadlessRenderer::default(),
            RecordingAudio::default(),
            store,
        )
    }

    /// Park an obstacle right on top of the player
    fn drop_on_player(game: &mut TestGame) {
        let id = game.state.next_entity_id();
        let pos = Vec2::new(game.state.player.x, game.state.player.y);
        game.state.obstacles.push(Obstacle {
            id,
            pos,
            color: Color::RED,
        });
    }

    #[test]
    fn test_new_game_starts_engine_and_loads_best() {
        let game = new_game(MemoryStore::with_entries([("highScore", "90")]));
        assert!(game.audio().engine_on);
        assert_eq!(game.audio().engine_volume, 0.3);
        assert_eq!(game.high_score().best(), 90);
        assert!(game.is_running());
    }

    #[test]
    fn test_spawner_fires_on_cadence() {
        let mut game = new_game(MemoryStore::new());
        let mut elapsed = 0.0;
        while elapsed + FRAME_MS < 2000.0 {
            game.frame(FRAME_MS);
            elapsed += FRAME_MS;
        }
        assert_eq!(game.stats().spawned, 0);
        game.frame(FRAME_MS + 1.0);
        assert_eq!(game.stats().spawned, 1);
        assert_eq!(game.renderer().obstacles_drawn, 1);
    }

    #[test]
    fn test_road_scrolls_with_frames() {
        let mut game = new_game(MemoryStore::new());
        let before = game.road().tops[0];
        game.frame(40.0);
        assert_eq!(game.road().tops[0], before + 2.0 * game.state().speed);
    }

    #[test]
    fn test_crash_plays_sound_and_flashes() {
        let mut game = new_game(MemoryStore::new());
        drop_on_player(&mut game);

        assert!(game.frame(FRAME_MS));
        assert_eq!(game.state().player.lives, 2);
        assert_eq!(game.audio().played, vec![SoundEffect::Crash]);
        assert_eq!(game.renderer().crashes, 1);
        assert_eq!(game.stats().crashed, 1);
    }

    #[test]
    fn test_level_up_speeds_spawner_and_engine() {
        let mut game = new_game(MemoryStore::new());
        game.state.score = 90;
        let id = game.state.next_entity_id();
        game.state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(game.tuning.min_player_x(), game.tuning.arena_height),
            color: Color::RED,
        });
        game.state.player.x = game.tuning.max_player_x();

        game.frame(FRAME_MS);

        assert_eq!(game.state().level, 2);
        assert_eq!(game.schedule().spawner.period_ms(), 1000.0);
        assert!((game.audio().engine_rate - 1.2).abs() < 1e-6);
        assert_eq!(game.audio().played, vec![SoundEffect::Milestone]);
    }

    #[test]
    fn test_game_over_stops_everything_and_saves_best() {
        let mut game = new_game(MemoryStore::with_entries([("highScore", "20")]));
        game.state.player.lives = 1;
        game.state.score = 50;
        drop_on_player(&mut game);

        assert!(!game.frame(FRAME_MS));

        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert!(!game.schedule().is_running());
        assert!(!game.audio().engine_on);
        assert_eq!(game.high_score().best(), 50);
        assert_eq!(
            game.store().get("highScore").unwrap().as_deref(),
            Some("50")
        );
        assert_eq!(game.renderer().game_over, Some((50, 50)));

        // Terminal: no more frames, spawns or scoring
        let frames = game.renderer().frames;
        for _ in 0..500 {
            assert!(!game.frame(FRAME_MS));
        }
        assert_eq!(game.renderer().frames, frames);
        assert_eq!(game.stats().spawned, 0);
        assert_eq!(game.state().score, 50);
    }

    #[test]
    fn test_game_over_keeps_higher_best() {
        let mut game = new_game(MemoryStore::with_entries([("highScore", "300")]));
        game.state.player.lives = 1;
        game.state.score = 120;
        drop_on_player(&mut game);

        game.frame(FRAME_MS);

        assert_eq!(game.high_score().best(), 300);
        assert_eq!(
            game.store().get("highScore").unwrap().as_deref(),
            Some("300")
        );
        assert_eq!(game.renderer().game_over, Some((120, 300)));
    }

    #[test]
    fn test_unused_keys_ignored() {
        let mut game = new_game(MemoryStore::new());
        assert!(!game.key_down("Enter"));
        assert!(game.key_down("ArrowLeft"));
        let start = game.state().player.x;
        game.frame(FRAME_MS);
        assert_eq!(game.state().player.x, start - 5.0);
        assert!(game.key_up("ArrowLeft"));
        game.frame(FRAME_MS);
        assert_eq!(game.state().player.x, start - 5.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn every_obstacle_accounted_for_once(
            seed in any::<u64>(),
            steering in proptest::collection::vec(0u8..4, 1..60),
        ) {
            let mut game = Game::new(
                seed,
                Tuning::default(),
                HeadlessRenderer::default(),
                RecordingAudio::default(),
                MemoryStore::new(),
            );

            'run: for choice in steering {
                game.key_up("ArrowLeft");
                game.key_up("ArrowRight");
                if choice & 1 == 1 {
                    game.key_down("ArrowLeft");
                }
                if choice & 2 == 2 {
                    game.key_down("ArrowRight");
                }
                for _ in 0..60 {
                    let lives = game.state().player.lives;
                    let running = game.frame(FRAME_MS);
                    prop_assert!(game.state().player.lives + 1 >= lives);
                    if !running {
                        break 'run;
                    }
                }
            }

            let stats = game.stats();
            let remaining = game.state().obstacles.len() as u32;
            prop_assert_eq!(stats.spawned, stats.passed + stats.crashed + remaining);
            prop_assert_eq!(game.state().score, u64::from(stats.passed) * 10);
            prop_assert_eq!(
                u32::from(game.state().player.lives) + stats.crashed,
                u32::from(game.tuning().start_lives)
            );
        }
    }
}
