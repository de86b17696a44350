use std::f32::consts::PI;
use rand::Rng;
use crate::animation::{lerp, smoothstep, FormationPhase, ProgressIntegrator};
use crate::config::SceneConfig;
use crate::layout::{build_topper, ElementRecord};
use crate::math::Vec3;
use super::buffer::{BufferLayout, FrameBuffer};
use super::ElementTransform;

pub const STAR_POINTS: usize = 5;
pub const STAR_OUTER_RADIUS: f32 = 1.2;
pub const STAR_INNER_RADIUS: f32 = 0.5;

const SCATTERED_SPIN: f32 = 0.2;
const ASSEMBLED_SPIN: f32 = 0.5;
const SCATTERED_SIZE: f32 = 0.5;
const PULSE_AMPLITUDE: f32 = 0.05;

/// Outline of a star in the XY plane, first vertex at the top, alternating
/// outer and inner radii. The render adapter extrudes it.
pub fn star_outline(points: usize, outer: f32, inner: f32) -> Vec<(f32, f32)> {
    (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = i as f32 * PI / points as f32;
            (angle.sin() * radius, angle.cos() * radius)
        })
        .collect()
}

/// Evaluate the topper for this frame
pub fn evaluate_topper(record: &ElementRecord, progress: f32, time: f32) -> ElementTransform {
    let blend = smoothstep(0.0, 1.0, progress);
    let position = record.scatter_position.lerp(&record.assembled_position, blend);

    // Lazy tumble while scattered, steady spin about Y once placed.
    // Z returns to zero so the star ends upright.
    let tumble = time * SCATTERED_SPIN;
    let rotation = Vec3::new(
        0.0,
        lerp(tumble, time * ASSEMBLED_SPIN, blend),
        lerp(tumble, 0.0, blend),
    );

    let pulse = 1.0 + (time * 2.0).sin() * PULSE_AMPLITUDE;
    let size = lerp(SCATTERED_SIZE, 1.0, blend) * record.scale;

    ElementTransform {
        position,
        rotation,
        scale: size * pulse,
        color: record.color,
        alpha: 1.0,
    }
}

/// The single star at the apex
pub struct TopperSystem {
    record: ElementRecord,
    integrator: ProgressIntegrator,
    buffer: FrameBuffer,
}

impl TopperSystem {
    pub fn new(record: ElementRecord, rate: f32) -> Self {
        let mut system = Self {
            record,
            integrator: ProgressIntegrator::new(rate),
            buffer: FrameBuffer::new(BufferLayout::Instances, 1),
        };
        system.refresh(system.integrator.progress(), 0.0);
        system
    }

    /// Generate the placement from configuration
    pub fn build<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let system = Self::new(build_topper(config, rng), config.damping.topper);
        log::info!("topper: apex at y = {:.2}", system.record.assembled_position.y);
        system
    }

    pub fn update(&mut self, target: f32, dt: f32, time: f32) {
        let progress = self.integrator.advance(target, dt);
        self.refresh(progress, time);
    }

    fn refresh(&mut self, progress: f32, time: f32) {
        let t = evaluate_topper(&self.record, progress, time);
        self.buffer.write(0, &t);
    }

    pub fn record(&self) -> &ElementRecord {
        &self.record
    }

    pub fn progress(&self) -> f32 {
        self.integrator.progress()
    }

    pub fn phase(&self) -> FormationPhase {
        self.integrator.phase()
    }

    /// Get instance data for GPU upload
    pub fn frame_data(&self) -> &[f32] {
        self.buffer.as_slice()
    }
}
