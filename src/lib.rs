use wasm_bindgen::prelude::*;
use js_sys::Float32Array;

pub mod animation;
pub mod config;
pub mod formation;
pub mod layout;
pub mod math;
pub mod population;

use animation::FormationPhase;
use config::SceneConfig;
use formation::Formation;
use population::topper::{star_outline, STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    console_log::init_with_level(log::Level::Info).ok();
}

/// Main engine state exposed to JavaScript
///
/// JavaScript owns the canvas, the camera and the draw calls. Each frame it
/// calls `update(dt)` and uploads the population buffers; the toggle button
/// calls `toggle_form`.
#[wasm_bindgen]
pub struct ScatterTree {
    formation: Formation,
}

#[wasm_bindgen]
impl ScatterTree {
    /// Create an engine with the built-in scene configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ScatterTree, JsValue> {
        Self::build(SceneConfig::default())
    }

    /// Create an engine from a YAML configuration (absent keys use defaults)
    #[wasm_bindgen]
    pub fn from_yaml(yaml: &str) -> Result<ScatterTree, JsValue> {
        let config = SceneConfig::from_yaml(yaml)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(config)
    }

    fn build(config: SceneConfig) -> Result<ScatterTree, JsValue> {
        let formation = Formation::new(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { formation })
    }

    /// Advance one frame
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32) {
        self.formation.tick(dt);
    }

    /// Flip between scattered and assembled; returns the new mode
    #[wasm_bindgen]
    pub fn toggle_form(&mut self) -> bool {
        self.formation.toggle()
    }

    #[wasm_bindgen]
    pub fn set_tree_form(&mut self, tree_form: bool) {
        self.formation.set_tree_form(tree_form);
    }

    #[wasm_bindgen]
    pub fn is_tree_form(&self) -> bool {
        self.formation.is_tree_form()
    }

    /// "scattered", "transitioning" or "assembled"
    #[wasm_bindgen]
    pub fn phase(&self) -> String {
        phase_name(self.formation.phase()).to_string()
    }

    #[wasm_bindgen]
    pub fn elapsed(&self) -> f32 {
        self.formation.time()
    }

    // === Render adapter buffers ===

    /// Foliage points: position(3) + size(1) + alpha(1) + color(3)
    #[wasm_bindgen]
    pub fn foliage_data(&self) -> Float32Array {
        Float32Array::from(self.formation.foliage().frame_data())
    }

    /// Sphere instances: matrix(16) + color(3) + alpha(1)
    #[wasm_bindgen]
    pub fn sphere_data(&self) -> Float32Array {
        Float32Array::from(self.formation.spheres().frame_data())
    }

    /// Box instances: matrix(16) + color(3) + alpha(1)
    #[wasm_bindgen]
    pub fn box_data(&self) -> Float32Array {
        Float32Array::from(self.formation.boxes().frame_data())
    }

    /// Topper instance: matrix(16) + color(3) + alpha(1)
    #[wasm_bindgen]
    pub fn topper_data(&self) -> Float32Array {
        Float32Array::from(self.formation.topper().frame_data())
    }

    /// Star outline as interleaved x, y pairs
    #[wasm_bindgen]
    pub fn topper_outline(&self) -> Float32Array {
        let flat = flatten_outline(&star_outline(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS));
        Float32Array::from(flat.as_slice())
    }

    #[wasm_bindgen]
    pub fn foliage_count(&self) -> usize {
        self.formation.foliage().len()
    }

    #[wasm_bindgen]
    pub fn sphere_count(&self) -> usize {
        self.formation.spheres().len()
    }

    #[wasm_bindgen]
    pub fn box_count(&self) -> usize {
        self.formation.boxes().len()
    }

    // === Progress ===

    #[wasm_bindgen]
    pub fn foliage_progress(&self) -> f32 {
        self.formation.foliage().progress()
    }

    #[wasm_bindgen]
    pub fn sphere_progress(&self) -> f32 {
        self.formation.spheres().progress()
    }

    #[wasm_bindgen]
    pub fn box_progress(&self) -> f32 {
        self.formation.boxes().progress()
    }

    #[wasm_bindgen]
    pub fn topper_progress(&self) -> f32 {
        self.formation.topper().progress()
    }
}

fn phase_name(phase: FormationPhase) -> &'static str {
    match phase {
        FormationPhase::Scattered => "scattered",
        FormationPhase::Transitioning => "transitioning",
        FormationPhase::Assembled => "assembled",
    }
}

fn flatten_outline(outline: &[(f32, f32)]) -> Vec<f32> {
    outline.iter().flat_map(|&(x, y)| [x, y]).collect()
}
