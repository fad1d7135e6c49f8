use duet_core::simulation::CharacterState;
use duet_core::{Buttons, Element, Simulation};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Game {
    sim: Simulation,
}

fn set(obj: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), value)?;
    Ok(())
}

fn character(state: CharacterState) -> Result<js_sys::Object, JsValue> {
    let obj = js_sys::Object::new();
    set(&obj, "x", &JsValue::from_f64(state.x as f64))?;
    set(&obj, "y", &JsValue::from_f64(state.y as f64))?;
    set(&obj, "vx", &JsValue::from_f64(state.vx as f64))?;
    set(&obj, "vy", &JsValue::from_f64(state.vy as f64))?;
    set(&obj, "grounded", &JsValue::from_bool(state.grounded != 0))?;
    set(&obj, "dead", &JsValue::from_bool(state.dead != 0))?;
    Ok(obj)
}

#[wasm_bindgen]
impl Game {
    /// Load a level from its JSON description.
    #[wasm_bindgen(constructor)]
    pub fn new(level_json: &str) -> Result<Game, JsValue> {
        let sim = Simulation::from_json(level_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Game { sim })
    }

    /// Step once (60Hz) and return both characters, the level flags and the
    /// names of this tick's events as a JS object.
    pub fn step(&mut self, fire_bits: u8, water_bits: u8) -> Result<JsValue, JsValue> {
        let fire = Buttons::from_bits_truncate(fire_bits);
        let water = Buttons::from_bits_truncate(water_bits);
        let events = self.sim.step_pair(fire, water);

        let obj = js_sys::Object::new();
        for (key, element) in [("fire", Element::Fire), ("water", Element::Water)] {
            let state = self.sim.character_state(element).unwrap_or_default();
            let value = character(state)?;
            set(&obj, key, &value)?;
        }

        let level = self.sim.level();
        set(&obj, "fireExitReached", &JsValue::from_bool(level.fire_exit_reached()))?;
        set(&obj, "waterExitReached", &JsValue::from_bool(level.water_exit_reached()))?;
        set(&obj, "gameOver", &JsValue::from_bool(level.is_game_over()))?;
        set(&obj, "completed", &JsValue::from_bool(level.is_level_completed()))?;

        let names = js_sys::Array::new();
        for e in &events {
            names.push(&JsValue::from_str(e.name()));
        }
        set(&obj, "events", &names)?;

        Ok(JsValue::from(obj))
    }

    pub fn score(&self) -> u8 {
        self.sim.score()
    }

    pub fn tick(&self) -> f64 {
        self.sim.tick() as f64
    }
}
