use rand::Rng;
use crate::config::palette::{FOLIAGE_DEEP, FOLIAGE_LIGHT};
use crate::config::SceneConfig;
use crate::math::Vec3;

/// Golden angle in radians, rounded the way the foliage spiral uses it
pub const FOLIAGE_ANGLE_STEP: f32 = 2.39996;

/// Full width of the uniform radial jitter on foliage
pub const FOLIAGE_RADIUS_JITTER: f32 = 1.5;

/// Height of the topper above the cone tip
pub const APEX_LIFT: f32 = 0.8;

/// The upright cone the assembled tree is built around, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeShape {
    pub height: f32,
    pub base_radius: f32,
}

impl ConeShape {
    pub fn new(height: f32, base_radius: f32) -> Self {
        Self { height, base_radius }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.tree_height, config.tree_radius_base)
    }

    pub fn base_y(&self) -> f32 {
        -self.height / 2.0
    }

    pub fn top_y(&self) -> f32 {
        self.height / 2.0
    }

    /// 0 at the base, 1 at the tip (unclamped)
    pub fn normalized_height(&self, y: f32) -> f32 {
        (y - self.base_y()) / self.height
    }

    /// Cone surface radius at height `y`, linear taper to a point at the tip
    pub fn radius_at(&self, y: f32) -> f32 {
        self.base_radius * (1.0 - self.normalized_height(y).clamp(0.0, 1.0))
    }
}

/// Assembled position of foliage element `index` on the conical shell
pub fn conical_shell_position<R: Rng + ?Sized>(rng: &mut R, index: usize, cone: &ConeShape) -> Vec3 {
    let y = rng.gen_range(cone.base_y()..cone.top_y());
    let jitter = (rng.gen::<f32>() - 0.5) * FOLIAGE_RADIUS_JITTER;
    let angle = index as f32 * FOLIAGE_ANGLE_STEP;
    Vec3::from_cylindrical(cone.radius_at(y) + jitter, angle, y)
}

/// The single fixed point above the cone tip
pub fn apex_position(cone: &ConeShape) -> Vec3 {
    Vec3::new(0.0, cone.top_y() + APEX_LIFT, 0.0)
}

/// Foliage tint: deep emerald at the base blending to lighter green at the tip
pub fn foliage_color(assembled: Vec3, cone: &ConeShape) -> Vec3 {
    let t = cone.normalized_height(assembled.y);
    FOLIAGE_DEEP.lerp(&FOLIAGE_LIGHT, t)
}
