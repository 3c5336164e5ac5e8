//! Browser bridge
//!
//! The page script owns the canvas and the event listeners; it forwards
//! events here, calls `frame` once per animation frame and draws from the
//! JSON snapshot.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::input::InputBuffer;
use crate::Settings;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{SimState, tick};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Furnace Reline starting...");
}

/// One simulation instance plus its input buffer and frame accumulator
#[wasm_bindgen]
pub struct WebSimulation {
    state: SimState,
    settings: Settings,
    input: InputBuffer,
    accumulator: f32,
}

#[wasm_bindgen]
impl WebSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSimulation {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Simulation initialized with seed: {}", seed);
        WebSimulation {
            state: SimState::with_settings(seed, &settings),
            settings,
            input: InputBuffer::new(),
            accumulator: 0.0,
        }
    }

    /// Returns whether the key was used, so the page can `preventDefault`
    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    pub fn pointer_drag(&mut self, dx: f32, dy: f32) {
        self.input.pointer_drag(Vec2::new(dx, dy));
    }

    pub fn pointer_release(&mut self) {
        self.input.pointer_release();
    }

    pub fn set_action(&mut self, held: bool) {
        self.input.set_action(held);
    }

    pub fn select_tool(&mut self, index: usize) {
        self.input.select_tool(index);
    }

    pub fn start(&mut self) {
        self.input.start();
    }

    /// Reset to Intro. A new seed is drawn unless settings pin one.
    pub fn reset(&mut self) {
        let seed = self
            .settings
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        self.state = SimState::with_settings(seed, &self.settings);
        self.input.release_all();
        self.accumulator = 0.0;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    /// Advance by a frame's wall-clock time (seconds), in fixed ticks
    pub fn frame(&mut self, dt: f32) {
        // Clamp long frames (tab switches)
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Current snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.state
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// SVG path data for a segment of the current stage
    pub fn segment_path(&self, id: usize) -> Option<String> {
        self.state
            .stage
            .segments()
            .get(id)
            .map(|s| s.outline().to_svg())
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.settings
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace and persist settings. Takes effect on the next reset.
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save();
        self.settings = settings;
        Ok(())
    }
}

impl Default for WebSimulation {
    fn default() -> Self {
        Self::new()
    }
}
