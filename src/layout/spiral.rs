use rand::Rng;
use crate::math::Vec3;
use super::cone::ConeShape;

/// π(3 - √5)
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Ornaments never sit closer to the trunk than this
pub const MIN_ORNAMENT_RADIUS: f32 = 0.2;

/// Signed radial offset range: mostly tucked into the foliage, slightly proud of it
pub const DEPTH_JITTER: (f32, f32) = (-1.2, 0.4);

const BRANCH_AMPLITUDE: f32 = 0.5;
const INDEX_JITTER: f32 = 0.1;
const HEIGHT_JITTER: f32 = 1.0;
const ANGLE_JITTER: f32 = 0.2;
/// The spiral skips the last half unit at the tip and bottom
const HEIGHT_INSET: f32 = 1.0;

/// Low-frequency lobes around the cone, a stand-in for branch clusters
pub fn branch_noise(angle: f32, y: f32) -> f32 {
    (angle * 5.0 + y * 0.5).sin() * (y * 2.0).cos() * BRANCH_AMPLITUDE
}

/// Assembled position of ornament `index` out of `count`.
///
/// Height follows `sqrt(k)` down from the top so density grows toward the
/// wider base. `angle_offset` keeps different ornament kinds off each
/// other's spiral arms.
pub fn organic_spiral_position<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    count: usize,
    cone: &ConeShape,
    angle_offset: f32,
) -> Vec3 {
    let count = count.max(1) as f32;
    let k = (index as f32 + rng.gen::<f32>() * INDEX_JITTER) / count;
    let effective_height = cone.height - HEIGHT_INSET;
    let top_y = cone.top_y() - HEIGHT_INSET / 2.0;

    let y_jitter = (rng.gen::<f32>() - 0.5) * HEIGHT_JITTER;
    let y = top_y - effective_height * k.sqrt() + y_jitter;

    let angle_jitter = (rng.gen::<f32>() - 0.5) * ANGLE_JITTER;
    let angle = index as f32 * GOLDEN_ANGLE + angle_offset + angle_jitter;

    let (depth_low, depth_high) = DEPTH_JITTER;
    let depth = rng.gen_range(depth_low..depth_high);
    let radius = (cone.radius_at(y) + branch_noise(angle, y) + depth).max(MIN_ORNAMENT_RADIUS);

    Vec3::from_cylindrical(radius, angle, y)
}
