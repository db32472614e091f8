//! Browser bindings
//!
//! Thin `wasm_bindgen` wrapper over [`Arcade`]. Frames cross the boundary as
//! JSON strings; the page owns rendering, the frame clock, and DOM listeners.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::arcade::{Arcade, GameKind, Key};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed
        return;
    }
    log::info!("Arcade Core starting...");
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Could not encode frame: {}", e);
        "null".to_string()
    })
}

#[wasm_bindgen]
pub struct WebArcade {
    inner: Arcade,
}

#[wasm_bindgen]
impl WebArcade {
    /// `tuning_json` may override any subset of the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebArcade {
        let tuning = match tuning_json.as_deref() {
            Some(json) => Tuning::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed tuning: {}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        WebArcade {
            inner: Arcade::new(tuning, seed),
        }
    }

    /// Load a game by card id ("flappy", "pong"). Returns false for unknown ids.
    pub fn select(&mut self, game: &str) -> bool {
        match GameKind::from_str(game) {
            Some(kind) => {
                self.inner.select(kind);
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) {
        self.inner.back();
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.inner.toggle_pause();
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, code: &str) {
        self.inner.key_down(Key::from_code(code));
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, code: &str) {
        self.inner.key_up(Key::from_code(code));
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self) {
        self.inner.pointer_down();
    }

    /// JSON array of the frames produced during `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: f64) -> String {
        to_json(&self.inner.advance(elapsed_ms))
    }

    /// JSON of the current frame, or `null` on the menu
    pub fn snapshot(&self) -> String {
        to_json(&self.inner.snapshot())
    }

    pub fn controls(&self) -> String {
        to_json(&self.inner.controls())
    }
}
