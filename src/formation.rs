//! The complete scatter/tree scene core
//!
//! One `tick` per rendered frame: read the mode flag, advance the clock,
//! then let every population integrate its own progress and refresh its
//! frame buffer. Populations never read each other's state.

use rand::Rng;
use crate::animation::{FormationPhase, ModeController, TargetState};
use crate::config::{ConfigError, SceneConfig};
use crate::layout::OrnamentKind;
use crate::population::{FoliageSystem, OrnamentSystem, TopperSystem};

pub struct Formation {
    config: SceneConfig,
    mode: ModeController,
    time: f32,
    foliage: FoliageSystem,
    spheres: OrnamentSystem,
    boxes: OrnamentSystem,
    topper: TopperSystem,
}

impl Formation {
    /// Validate `config` and build every population with thread-local randomness
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Validate `config` and build every population from `rng`
    pub fn with_rng<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let foliage = FoliageSystem::build(&config, rng);
        let spheres = OrnamentSystem::build(OrnamentKind::Sphere, &config, rng);
        let boxes = OrnamentSystem::build(OrnamentKind::Box, &config, rng);
        let topper = TopperSystem::build(&config, rng);
        log::info!("formation ready: {} elements", config.total_elements());

        Ok(Self {
            config,
            mode: ModeController::default(),
            time: 0.0,
            foliage,
            spheres,
            boxes,
            topper,
        })
    }

    /// Advance one frame. Negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;

        let target = self.mode.target().value();
        let time = self.time;
        self.foliage.update(target, dt, time);
        self.spheres.update(target, dt, time);
        self.boxes.update(target, dt, time);
        self.topper.update(target, dt, time);
    }

    pub fn toggle(&mut self) -> bool {
        self.mode.toggle()
    }

    pub fn set_tree_form(&mut self, tree_form: bool) {
        self.mode.set_tree_form(tree_form);
    }

    pub fn is_tree_form(&self) -> bool {
        self.mode.is_tree_form()
    }

    pub fn target(&self) -> TargetState {
        self.mode.target()
    }

    /// Elapsed seconds since construction
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn foliage(&self) -> &FoliageSystem {
        &self.foliage
    }

    pub fn spheres(&self) -> &OrnamentSystem {
        &self.spheres
    }

    pub fn boxes(&self) -> &OrnamentSystem {
        &self.boxes
    }

    pub fn topper(&self) -> &TopperSystem {
        &self.topper
    }

    /// Scattered or Assembled only once every population has settled there
    pub fn phase(&self) -> FormationPhase {
        let phases = [
            self.foliage.phase(),
            self.spheres.phase(),
            self.boxes.phase(),
            self.topper.phase(),
        ];
        if phases.iter().all(|&p| p == FormationPhase::Scattered) {
            FormationPhase::Scattered
        } else if phases.iter().all(|&p| p == FormationPhase::Assembled) {
            FormationPhase::Assembled
        } else {
            FormationPhase::Transitioning
        }
    }
}
