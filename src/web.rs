//! Browser bindings
//!
//! A thin `wasm_bindgen` wrapper over `Runner`. The page owns the canvas and
//! the requestAnimationFrame loop; it forwards key codes and timestamps here
//! and draws from `entities_json` / `hud_json`.

use wasm_bindgen::prelude::*;

use crate::runner::Runner;
use crate::settings::Settings;
use crate::sim::Viewport;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Errors only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Palace Run starting...");
}

/// Game instance handed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    runner: Runner,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    /// New game for a canvas of `width` x `height` pixels
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> WebGame {
        WebGame {
            runner: Runner::new(Settings::default(), Viewport::new(width, height)),
            last_time: None,
        }
    }

    /// Same as `new` with settings given as JSON
    pub fn with_settings(width: f64, height: f64, settings_json: &str) -> Result<WebGame, JsValue> {
        let settings = Settings::from_json(settings_json).map_err(to_js)?;
        Ok(WebGame {
            runner: Runner::new(settings, Viewport::new(width, height)),
            last_time: None,
        })
    }

    pub fn key_down(&mut self, code: &str) {
        self.runner.key_down(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.runner.key_up(code);
    }

    pub fn pointer_down(&mut self) {
        self.runner.pointer_down();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.runner.resize(width, height);
    }

    /// Advance by `dt_ms` milliseconds; returns frames stepped
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.runner.advance(dt_ms)
    }

    /// Advance to a requestAnimationFrame timestamp
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = self.last_time.map_or(0.0, |last| time_ms - last);
        self.last_time = Some(time_ms);
        self.runner.advance(dt)
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.runner.hud()).map_err(to_js)
    }

    pub fn entities_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.runner.entities()).map_err(to_js)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
