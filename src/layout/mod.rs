//! Layout generation for every element population
//!
//! Each element gets two fixed positions (scattered and assembled) plus its
//! static attributes, all drawn once at construction. Nothing here is touched
//! again after the population is built.

pub mod cone;
pub mod scatter;
pub mod spiral;

use std::f32::consts::TAU;
use rand::Rng;
use crate::config::palette::{Palette, BOX_PALETTE, GOLD, SPHERE_PALETTE};
use crate::config::SceneConfig;
use crate::math::Vec3;

pub use cone::{apex_position, conical_shell_position, foliage_color, ConeShape};
pub use scatter::sample_scatter;
pub use spiral::organic_spiral_position;

/// Scatter radius multiplier for ornaments relative to the configured radius
pub const ORNAMENT_SCATTER_FACTOR: f32 = 1.5;
/// Scatter radius multiplier for the topper
pub const TOPPER_SCATTER_FACTOR: f32 = 1.2;

/// Static per-element record, computed once per population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRecord {
    pub scatter_position: Vec3,
    pub assembled_position: Vec3,
    /// Uniform in [0, 1); drives sparkle chance and phase offsets
    pub random_seed: f32,
    /// Base euler angles
    pub rotation_seed: Vec3,
    pub scale: f32,
    pub color: Vec3,
}

/// The two instanced ornament kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentKind {
    Sphere,
    Box,
}

impl OrnamentKind {
    /// Spiral offset so the two kinds don't share arms
    pub fn angle_offset(self) -> f32 {
        match self {
            OrnamentKind::Sphere => 0.0,
            OrnamentKind::Box => 1.618,
        }
    }

    pub fn base_scale(self) -> f32 {
        match self {
            OrnamentKind::Sphere => 0.25,
            OrnamentKind::Box => 0.35,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            OrnamentKind::Sphere => SPHERE_PALETTE,
            OrnamentKind::Box => BOX_PALETTE,
        }
    }

    pub fn count(self, config: &SceneConfig) -> usize {
        match self {
            OrnamentKind::Sphere => config.sphere_count,
            OrnamentKind::Box => config.box_count,
        }
    }

    pub fn damping(self, config: &SceneConfig) -> f32 {
        match self {
            OrnamentKind::Sphere => config.damping.spheres,
            OrnamentKind::Box => config.damping.boxes,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OrnamentKind::Sphere => "sphere",
            OrnamentKind::Box => "box",
        }
    }
}

/// Foliage: uniform ball scatter, conical shell assembly, height-graded green
pub fn build_foliage<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Vec<ElementRecord> {
    let cone = ConeShape::from_config(config);
    (0..config.foliage_count)
        .map(|i| {
            let random_seed = rng.gen::<f32>();
            let scatter_position = sample_scatter(rng, config.scatter_radius);
            let assembled_position = conical_shell_position(rng, i, &cone);
            ElementRecord {
                scatter_position,
                assembled_position,
                random_seed,
                rotation_seed: Vec3::ZERO,
                scale: 1.0,
                color: foliage_color(assembled_position, &cone),
            }
        })
        .collect()
}

/// Sphere or box ornaments on the organic spiral
pub fn build_ornaments<R: Rng + ?Sized>(
    kind: OrnamentKind,
    config: &SceneConfig,
    rng: &mut R,
) -> Vec<ElementRecord> {
    let cone = ConeShape::from_config(config);
    let count = kind.count(config);
    let palette = kind.palette();
    let scatter_radius = config.scatter_radius * ORNAMENT_SCATTER_FACTOR;

    (0..count)
        .map(|i| {
            let scatter_position = sample_scatter(rng, scatter_radius);
            let assembled_position =
                organic_spiral_position(rng, i, count, &cone, kind.angle_offset());
            let rotation_seed = Vec3::new(
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
            );
            // Roughly one in seven gets a size bump
            let bump = if rng.gen::<f32>() > 0.85 { 0.25 } else { 0.0 };
            let scale = kind.base_scale() + rng.gen::<f32>() * 0.4 + bump;
            ElementRecord {
                scatter_position,
                assembled_position,
                random_seed: rng.gen::<f32>(),
                rotation_seed,
                scale,
                color: palette.pick(rng),
            }
        })
        .collect()
}

/// The single gold topper at the apex
pub fn build_topper<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> ElementRecord {
    let cone = ConeShape::from_config(config);
    ElementRecord {
        scatter_position: sample_scatter(rng, config.scatter_radius * TOPPER_SCATTER_FACTOR),
        assembled_position: apex_position(&cone),
        random_seed: rng.gen::<f32>(),
        rotation_seed: Vec3::ZERO,
        scale: 1.0,
        color: GOLD,
    }
}
