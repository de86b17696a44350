use rand::Rng;
use crate::animation::{lerp, smoothstep, FormationPhase, ProgressIntegrator};
use crate::config::SceneConfig;
use crate::layout::{build_ornaments, ElementRecord, OrnamentKind};
use crate::math::Vec3;
use super::buffer::{BufferLayout, FrameBuffer};
use super::ElementTransform;

/// Blend above which settled ornaments start to sway
pub const SWAY_THRESHOLD: f32 = 0.8;
/// Blend above which settled ornaments start to pulse
pub const PULSE_THRESHOLD: f32 = 0.9;

const BOB_AMPLITUDE: f32 = 0.3;
const TUMBLE_SPEED: f32 = 0.5;
const SWAY_AMPLITUDE: f32 = 0.05;
const PULSE_AMPLITUDE: f32 = 0.03;

/// Per-slot phase so neighbours don't move in lockstep
fn phase_offset(index: usize) -> f32 {
    index as f32 * 3.0
}

/// Evaluate ornament `index` for this frame
pub fn evaluate_ornament(record: &ElementRecord, index: usize, progress: f32, time: f32) -> ElementTransform {
    let blend = smoothstep(0.0, 1.0, progress);
    let phase = phase_offset(index);

    let bob = (1.0 - blend) * (time + record.scatter_position.x).sin() * BOB_AMPLITUDE;
    let mut position = record.scatter_position.lerp(&record.assembled_position, blend);
    position.y += bob;

    let sway = if blend > SWAY_THRESHOLD {
        (time * 1.5 + phase).sin() * SWAY_AMPLITUDE
    } else {
        0.0
    };
    let seed = record.rotation_seed;
    let tumble = time * TUMBLE_SPEED;
    let rotation = Vec3::new(
        lerp(seed.x + tumble, seed.x + sway, blend),
        lerp(seed.y + tumble, seed.y, blend),
        lerp(seed.z + tumble, seed.z + sway, blend),
    );

    let pulse = if blend > PULSE_THRESHOLD {
        1.0 + (time * 2.0 + phase).sin() * PULSE_AMPLITUDE
    } else {
        1.0
    };

    ElementTransform {
        position,
        rotation,
        scale: record.scale * pulse,
        color: record.color,
        alpha: 1.0,
    }
}

/// Instanced sphere or box ornaments hung on the organic spiral
pub struct OrnamentSystem {
    kind: OrnamentKind,
    records: Vec<ElementRecord>,
    integrator: ProgressIntegrator,
    buffer: FrameBuffer,
}

impl OrnamentSystem {
    /// Wrap `records`; the buffer is filled with the scattered pose at time 0
    pub fn new(kind: OrnamentKind, records: Vec<ElementRecord>, rate: f32) -> Self {
        let buffer = FrameBuffer::new(BufferLayout::Instances, records.len());
        let mut system = Self {
            kind,
            records,
            integrator: ProgressIntegrator::new(rate),
            buffer,
        };
        system.refresh(system.integrator.progress(), 0.0);
        system
    }

    /// Generate the layout from configuration
    pub fn build<R: Rng + ?Sized>(kind: OrnamentKind, config: &SceneConfig, rng: &mut R) -> Self {
        let records = build_ornaments(kind, config, rng);
        let system = Self::new(kind, records, kind.damping(config));
        log::info!("{} ornaments: {} instances", kind.name(), system.len());
        system
    }

    /// Advance progress toward `target` and refresh every instance
    pub fn update(&mut self, target: f32, dt: f32, time: f32) {
        let progress = self.integrator.advance(target, dt);
        self.refresh(progress, time);
    }

    fn refresh(&mut self, progress: f32, time: f32) {
        for (i, record) in self.records.iter().enumerate() {
            let t = evaluate_ornament(record, i, progress, time);
            self.buffer.write(i, &t);
        }
    }

    pub fn kind(&self) -> OrnamentKind {
        self.kind
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.records
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

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
