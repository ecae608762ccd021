//! Pixel Racer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use pixel_racer::audio::WebAudio;
    use pixel_racer::persistence::LocalStore;
    use pixel_racer::renderer::DomRenderer;
    use pixel_racer::sim::RoadLines;
    use pixel_racer::{Game, Settings, Tuning};

    /// Frame delta assumed for the very first frame (ms)
    const FIRST_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Game plus frame timing
    struct Runner {
        game: Game<DomRenderer, WebAudio, LocalStore>,
        last_time: f64,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Pixel Racer starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        let tuning = match DomRenderer::arena_size(&document) {
            Some((width, height)) => Tuning::default()
                .with_arena(width, height)
                .unwrap_or_else(|e| {
                    log::warn!("{} - using default arena", e);
                    Tuning::default()
                }),
            None => Tuning::default(),
        };

        let store = LocalStore::open();
        let settings = Settings::load(&store);
        let Some(renderer) =
            DomRenderer::attach(&document, settings.player_color, &RoadLines::new(&tuning))
        else {
            log::error!("Game markup incomplete - cannot start");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, tuning, renderer, WebAudio::new(), store);
        let runner = Rc::new(RefCell::new(Runner {
            game,
            last_time: 0.0,
        }));

        setup_input_handlers(runner.clone());
        setup_restart_button();

        request_animation_frame(runner);

        log::info!("Pixel Racer running!");
    }

    fn setup_input_handlers(runner: Rc<RefCell<Runner>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if runner.borrow_mut().game.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if runner.borrow_mut().game.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Restart is a full reload of the start page
    fn setup_restart_button() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restartGame") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("index.html");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(runner: Rc<RefCell<Runner>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(runner, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(runner: Rc<RefCell<Runner>>, time: f64) {
        let keep_going = {
            let mut r = runner.borrow_mut();
            let dt = if r.last_time > 0.0 {
                time - r.last_time
            } else {
                FIRST_FRAME_MS
            };
            r.last_time = time;
            r.game.frame(dt)
        };

        // The chain simply ends at game over
        if keep_going {
            request_animation_frame(runner);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use pixel_racer::audio::SilentAudio;
    use pixel_racer::persistence::MemoryStore;
    use pixel_racer::renderer::HeadlessRenderer;
    use pixel_racer::{Game, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five minutes of play at 60 fps
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Pixel Racer (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    // Usage: pixel-racer [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let tuning = match args.next() {
        None => Tuning::default(),
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Cannot use tuning file {}: {}", path, e);
                    return std::process::ExitCode::FAILURE;
                }
            }
        }
    };

    let mut game = Game::new(
        seed,
        tuning,
        HeadlessRenderer::default(),
        SilentAudio,
        MemoryStore::new(),
    );

    let mut frames = 0;
    while frames < MAX_FRAMES {
        autopilot::steer(&mut game);
        frames += 1;
        if !game.frame(FRAME_MS) {
            break;
        }
    }

    let stats = game.stats();
    let state = game.state();
    println!(
        "seed {}: {} frames, score {}, level {}, lives {}, dodged {}/{} cars",
        seed,
        frames,
        state.score,
        state.level,
        state.player.lives,
        stats.passed,
        stats.spawned
    );
    std::process::ExitCode::SUCCESS
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use pixel_racer::Game;
    use pixel_racer::audio::AudioPlayer;
    use pixel_racer::persistence::KeyValueStore;
    use pixel_racer::renderer::Renderer;

    /// Extra clearance when deciding whether a car is in our lane
    const LANE_SLACK: f32 = 8.0;

    /// Dodge the closest car bearing down on the player's lane
    pub fn steer<R: Renderer, A: AudioPlayer, S: KeyValueStore>(game: &mut Game<R, A, S>) {
        let (left, right) = {
            let state = game.state();
            let tuning = game.tuning();
            let player = state.player.rect(tuning);

            let threat = state
                .obstacles
                .iter()
                .map(|o| o.rect(tuning))
                .filter(|r| {
                    r.top() < player.bottom()
                        && r.left() < player.right() + LANE_SLACK
                        && r.right() > player.left() - LANE_SLACK
                })
                .max_by(|a, b| a.top().total_cmp(&b.top()));

            match threat {
                None => (false, false),
                Some(car) => {
                    let car_center = (car.left() + car.right()) / 2.0;
                    let player_center = (player.left() + player.right()) / 2.0;
                    let can_go_right = state.player.x < tuning.max_player_x();
                    let can_go_left = state.player.x > tuning.min_player_x();
                    let go_right = (car_center <= player_center && can_go_right) || !can_go_left;
                    (!go_right, go_right)
                }
            }
        };

        game.key_up("ArrowLeft");
        game.key_up("ArrowRight");
        if left {
            game.key_down("ArrowLeft");
        }
        if right {
            game.key_down("ArrowRight");
        }
    }
}
