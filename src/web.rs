//! Browser bindings
//!
//! Lets the page animate drops with the same physics the seeder uses. Results
//! cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::settings::BoardSettings;
use crate::sim::{PegLayout, RngState, random_drop, simulate_drop as run_drop};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Plinko simulator loaded");
}

/// Simulate one drop on the default board
///
/// `drop_x` picks the release position; a random one is used when omitted.
#[wasm_bindgen]
pub fn simulate_drop(seed: u64, drop_x: Option<f64>) -> Result<String, JsValue> {
    let settings = BoardSettings::default();
    let layout = PegLayout::from_settings(&settings);
    let mut rng = RngState::new(seed).to_rng();

    let result = match drop_x {
        Some(x) => run_drop(&layout, &settings, x, &mut rng),
        None => random_drop(&layout, &settings, &mut rng),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Peg positions of the default board
#[wasm_bindgen]
pub fn peg_layout() -> Result<String, JsValue> {
    let layout = PegLayout::from_settings(&BoardSettings::default());
    serde_json::to_string(layout.pegs()).map_err(|e| JsValue::from_str(&e.to_string()))
}
