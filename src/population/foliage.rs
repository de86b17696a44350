use rand::Rng;
use crate::animation::{lerp, smoothstep, FormationPhase, ProgressIntegrator};
use crate::config::palette::SPARKLE_GOLD;
use crate::config::SceneConfig;
use crate::layout::{build_foliage, ElementRecord};
use crate::math::Vec3;
use super::buffer::{BufferLayout, FrameBuffer};
use super::ElementTransform;

/// Only seeds above this can ever sparkle
pub const SPARKLE_SEED_THRESHOLD: f32 = 0.85;
/// The sparkle wave must exceed this for the override to fire
pub const SPARKLE_WAVE_THRESHOLD: f32 = 0.5;
pub const SPARKLE_SIZE_BOOST: f32 = 1.5;

/// Blend window in which the spiral twist is applied (exclusive)
pub const TWIST_WINDOW: (f32, f32) = (0.05, 0.95);

const SCATTERED_POINT_SIZE: f32 = 5.0;
const ASSEMBLED_POINT_SIZE: f32 = 4.5;
const SCATTERED_TURBULENCE: f32 = 0.8;
const ASSEMBLED_TURBULENCE: f32 = 0.02;
const TWIST_TURNS: f32 = 10.0;

/// Time-and-seed glitter test; never persisted
pub fn sparkles(seed: f32, time: f32) -> bool {
    seed > SPARKLE_SEED_THRESHOLD && (time * 3.0 + seed * 100.0).sin() > SPARKLE_WAVE_THRESHOLD
}

/// Drifting noise offset: strong while scattered, a faint shimmer once assembled
pub fn turbulence(scatter: Vec3, blend: f32, time: f32) -> Vec3 {
    let intensity = (1.0 - blend) * SCATTERED_TURBULENCE + blend * ASSEMBLED_TURBULENCE;
    Vec3::new(
        (time * 0.5 + scatter.y).sin(),
        (time * 0.3 + scatter.x).cos(),
        (time * 0.5 + scatter.z).sin(),
    ) * intensity
}

/// Rotate about Y by an angle that grows with height and shrinks to 0 as
/// the blend approaches 1. Outside the window the position passes through.
pub fn twist(position: Vec3, blend: f32) -> Vec3 {
    let (low, high) = TWIST_WINDOW;
    if blend <= low || blend >= high {
        return position;
    }
    let angle = (1.0 - blend) * TWIST_TURNS * (position.y / 10.0);
    position.rotate_y(angle)
}

/// Gentle per-point twinkle in [0.2, 1.0]
pub fn twinkle(seed: f32, time: f32) -> f32 {
    0.6 + 0.4 * (time + seed * 10.0).sin()
}

/// Evaluate one foliage point for this frame
pub fn evaluate_foliage(record: &ElementRecord, progress: f32, time: f32) -> ElementTransform {
    let blend = smoothstep(0.0, 1.0, progress);

    let mixed = record.scatter_position.lerp(&record.assembled_position, blend);
    let position = twist(mixed, blend) + turbulence(record.scatter_position, blend, time);

    let mut size = lerp(SCATTERED_POINT_SIZE, ASSEMBLED_POINT_SIZE, blend) * record.scale;
    let mut color = record.color;
    if sparkles(record.random_seed, time) {
        color = SPARKLE_GOLD;
        size *= SPARKLE_SIZE_BOOST;
    }

    ElementTransform {
        position,
        rotation: Vec3::ZERO,
        scale: size,
        color,
        alpha: twinkle(record.random_seed, time),
    }
}

/// The diffuse point cloud that forms the tree's body
pub struct FoliageSystem {
    records: Vec<ElementRecord>,
    integrator: ProgressIntegrator,
    buffer: FrameBuffer,
}

impl FoliageSystem {
    /// Wrap `records`; the buffer is filled with the scattered pose at time 0
    pub fn new(records: Vec<ElementRecord>, rate: f32) -> Self {
        let buffer = FrameBuffer::new(BufferLayout::Points, records.len());
        let mut system = Self {
            records,
            integrator: ProgressIntegrator::new(rate),
            buffer,
        };
        system.refresh(system.integrator.progress(), 0.0);
        system
    }

    /// Generate the layout from configuration
    pub fn build<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let system = Self::new(build_foliage(config, rng), config.damping.foliage);
        log::info!("foliage: {} points", system.len());
        system
    }

    /// Advance progress toward `target` and refresh every point
    pub fn update(&mut self, target: f32, dt: f32, time: f32) {
        let progress = self.integrator.advance(target, dt);
        self.refresh(progress, time);
    }

    fn refresh(&mut self, progress: f32, time: f32) {
        for (i, record) in self.records.iter().enumerate() {
            let t = evaluate_foliage(record, progress, time);
            self.buffer.write(i, &t);
        }
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

    /// Get point data for GPU upload
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(seed: f32) -> ElementRecord {
        ElementRecord {
            scatter_position: Vec3::new(3.0, 1.0, -2.0),
            assembled_position: Vec3::new(1.0, 4.0, 0.5),
            random_seed: seed,
            rotation_seed: Vec3::ZERO,
            scale: 1.0,
            color: Vec3::new(0.0, 0.2, 0.1),
        }
    }

    #[test]
    fn test_sparkle_fires_for_high_seed() {
        let fired = (0..1000).any(|i| sparkles(0.9, i as f32 * 0.01));
        assert!(fired, "seed 0.9 should sparkle at some time");
    }

    #[test]
    fn test_sparkle_never_fires_for_low_seed() {
        for i in 0..10_000 {
            assert!(!sparkles(0.5, i as f32 * 0.013));
        }
        assert!(!sparkles(SPARKLE_SEED_THRESHOLD, 0.0));
    }

    #[test]
    fn test_sparkle_overrides_color_and_size() {
        let r = record(0.9);
        let time = (0..1000)
            .map(|i| i as f32 * 0.01)
            .find(|&t| sparkles(0.9, t))
            .unwrap();
        let t = evaluate_foliage(&r, 1.0, time);
        assert_eq!(t.color, SPARKLE_GOLD);
        assert!((t.scale - ASSEMBLED_POINT_SIZE * SPARKLE_SIZE_BOOST).abs() < 1e-4);

        // Stored record is untouched
        assert_eq!(r.color, Vec3::new(0.0, 0.2, 0.1));
    }

    #[test]
    fn test_twist_window() {
        let p = Vec3::new(2.0, 5.0, 0.0);
        assert_eq!(twist(p, 0.0), p);
        assert_eq!(twist(p, 0.05), p);
        assert_eq!(twist(p, 0.95), p);
        assert_eq!(twist(p, 1.0), p);

        let mid = twist(p, 0.5);
        assert!(mid.distance(&p) > 0.1);
        assert!((mid.radial_length() - p.radial_length()).abs() < 1e-4);
        assert_eq!(mid.y, p.y);
    }

    #[test]
    fn test_turbulence_amplitude_tracks_blend() {
        let s = Vec3::new(0.3, 0.7, 1.1);
        let scattered = turbulence(s, 0.0, 0.0).length();
        let assembled = turbulence(s, 1.0, 0.0).length();
        assert!(scattered > 10.0 * assembled);
        assert!(assembled <= ASSEMBLED_TURBULENCE * 3f32.sqrt() + 1e-6);
    }

    #[test]
    fn test_alpha_range() {
        for i in 0..200 {
            let a = twinkle(i as f32 / 200.0, i as f32 * 0.1);
            assert!((0.2..=1.0).contains(&a));
        }
    }

    #[test]
    fn test_assembled_close_to_target() {
        let r = record(0.1);
        let t = evaluate_foliage(&r, 1.0, 12.3);
        // Only the residual shimmer remains
        assert!(t.position.distance(&r.assembled_position) <= ASSEMBLED_TURBULENCE * 3f32.sqrt() + 1e-4);
        assert!((t.scale - ASSEMBLED_POINT_SIZE).abs() < 1e-5);
    }

    #[test]
    fn test_buffer_filled_before_first_update() {
        let r = record(0.1);
        let system = FoliageSystem::new(vec![r], 2.0);
        let expected = evaluate_foliage(&r, 0.0, 0.0);
        let slot = system.frame_data();
        assert_eq!(&slot[0..3], &expected.position.to_array());
        assert_eq!(slot[3], expected.scale);
        assert!(slot[4] > 0.0);
        assert_eq!(slot[4], expected.alpha);
    }

    #[test]
    fn test_system_update_fills_buffer() {
        let config = SceneConfig {
            foliage_count: 50,
            ..SceneConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let mut system = FoliageSystem::build(&config, &mut rng);
        assert_eq!(system.len(), 50);
        assert_eq!(system.frame_data().len(), 50 * 8);

        let before: Vec<ElementRecord> = system.records().to_vec();
        for frame in 0..30 {
            system.update(1.0, 1.0 / 60.0, frame as f32 / 60.0);
        }
        assert!(system.progress() > 0.0 && system.progress() < 1.0);
        assert_eq!(system.phase(), FormationPhase::Transitioning);
        assert_eq!(system.records(), before.as_slice());
        assert!(system.frame_data().iter().all(|v| v.is_finite()));
    }
}
