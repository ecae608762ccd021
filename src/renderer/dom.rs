//! DOM renderer
//!
//! Cars are stacks of absolutely positioned 8px `div`s inside the page's
//! `.game-area`; positions are written as `left`/`top` pixel styles.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement};

use super::sprite::car_pixels;
use super::{Hud, Renderer};
use crate::color::Color;
use crate::sim::{GameState, RoadLines};

/// Crash shake animation length (ms)
const CRASH_ANIMATION_MS: i32 = 500;
/// Half-opacity blink after a non-fatal crash (ms)
const CRASH_BLINK_MS: i32 = 200;
/// Horizontal spacing of the dashes in a road line
const ROAD_SEGMENT_SPACING: f32 = 16.0;

pub struct DomRenderer {
    document: Document,
    player: HtmlElement,
    obstacles_layer: Element,
    obstacle_nodes: HashMap<u32, HtmlElement>,
    road_nodes: Vec<HtmlElement>,
    score: Element,
    level: Element,
    lives: Element,
    game_over: HtmlElement,
    final_score: Element,
    high_score: Element,
    hud: Option<Hud>,
}

impl DomRenderer {
    /// Bind to the page's elements. Returns `None` if the markup is incomplete.
    pub fn attach(document: &Document, player_color: Color, road: &RoadLines) -> Option<Self> {
        let element = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::error!("Missing #{} element", id);
            }
            el
        };
        let html = |id: &str| element(id)?.dyn_into::<HtmlElement>().ok();

        let player = html("playerCar")?;
        draw_car(document, &player, player_color);

        let road_layer = element("roadLines")?;
        road_layer.set_inner_html("");
        let road_nodes = road
            .tops
            .iter()
            .filter_map(|&top| new_road_line(document, &road_layer, top))
            .collect();

        Some(Self {
            document: document.clone(),
            player,
            obstacles_layer: element("obstacles")?,
            obstacle_nodes: HashMap::new(),
            road_nodes,
            score: element("score")?,
            level: element("level")?,
            lives: element("lives")?,
            game_over: html("gameOver")?,
            final_score: element("finalScore")?,
            high_score: element("highScore")?,
            hud: None,
        })
    }

    /// Laid-out size of the play area
    pub fn arena_size(document: &Document) -> Option<(f32, f32)> {
        let area = document
            .query_selector(".game-area")
            .ok()??
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some((area.offset_width() as f32, area.offset_height() as f32))
    }

    fn update_hud(&mut self, hud: Hud) {
        if self.hud == Some(hud) {
            return;
        }
        self.score.set_text_content(Some(&hud.score.to_string()));
        self.level.set_text_content(Some(&hud.level.to_string()));
        self.lives.set_text_content(Some(&hud.lives.to_string()));
        self.hud = Some(hud);
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, state: &GameState, road: &RoadLines) {
        set_px(&self.player, "left", state.player.x);

        // Drop nodes for obstacles that passed or crashed
        let live: HashSet<u32> = state.obstacles.iter().map(|o| o.id).collect();
        self.obstacle_nodes.retain(|id, node| {
            let keep = live.contains(id);
            if !keep {
                node.remove();
            }
            keep
        });

        for obstacle in &state.obstacles {
            let node = match self.obstacle_nodes.entry(obstacle.id) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    let Some(node) =
                        new_car_node(&self.document, &self.obstacles_layer, obstacle.color)
                    else {
                        continue;
                    };
                    e.insert(node)
                }
            };
            set_px(node, "left", obstacle.pos.x);
            set_px(node, "top", obstacle.pos.y);
        }

        for (node, &top) in self.road_nodes.iter().zip(&road.tops) {
            set_px(node, "top", top);
        }

        self.update_hud(Hud::from_state(state));
    }

    fn crash_feedback(&mut self, lives_left: u8) {
        let style = self.player.style();
        let _ = style.set_property("animation", "crash 0.5s");
        {
            let player = self.player.clone();
            after(CRASH_ANIMATION_MS, move || {
                let _ = player.style().set_property("animation", "");
            });
        }

        if lives_left > 0 {
            let _ = style.set_property("opacity", "0.5");
            let player = self.player.clone();
            after(CRASH_BLINK_MS, move || {
                let _ = player.style().set_property("opacity", "1");
            });
        }
    }

    fn show_game_over(&mut self, final_score: u64, high_score: u64) {
        self.final_score
            .set_text_content(Some(&final_score.to_string()));
        self.high_score
            .set_text_content(Some(&high_score.to_string()));
        let _ = self.game_over.style().set_property("display", "block");
    }
}

fn set_px(el: &HtmlElement, prop: &str, value: f32) {
    let _ = el.style().set_property(prop, &format!("{}px", value));
}

/// Run `f` once after `ms` milliseconds
fn after(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms);
}

fn new_div(document: &Document, class: &str) -> Option<HtmlElement> {
    let div = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    div.set_class_name(class);
    Some(div)
}

/// Replace an element's content with the pixel car
fn draw_car(document: &Document, el: &HtmlElement, body: Color) {
    el.set_inner_html("");
    for pixel in car_pixels(body) {
        let Some(div) = new_div(document, "pixel") else {
            continue;
        };
        set_px(&div, "left", pixel.left);
        set_px(&div, "top", pixel.top);
        let _ = div
            .style()
            .set_property("background-color", &pixel.color.to_string());
        let _ = el.append_child(&div);
    }
}

fn new_car_node(document: &Document, layer: &Element, color: Color) -> Option<HtmlElement> {
    let node = new_div(document, "obstacle")?;
    draw_car(document, &node, color);
    layer.append_child(&node).ok()?;
    Some(node)
}

/// A road line made of three dashes
fn new_road_line(document: &Document, layer: &Element, top: f32) -> Option<HtmlElement> {
    let line = new_div(document, "road-line")?;
    set_px(&line, "top", top);
    for j in 0..3 {
        let segment = new_div(document, "road-line-segment")?;
        set_px(&segment, "left", j as f32 * ROAD_SEGMENT_SPACING);
        line.append_child(&segment).ok()?;
    }
    layer.append_child(&line).ok()?;
    Some(line)
}
