//! Element populations and their per-frame transform evaluation
//!
//! Every population pairs its immutable layout records with one progress
//! integrator and one frame buffer. `update` advances progress, evaluates
//! each element as a pure function of (record, progress, time), and writes
//! the result into the buffer the render adapter uploads.

pub mod buffer;
pub mod foliage;
pub mod ornaments;
pub mod topper;

use crate::math::Vec3;

pub use buffer::{BufferLayout, FrameBuffer};
pub use foliage::FoliageSystem;
pub use ornaments::OrnamentSystem;
pub use topper::TopperSystem;

/// Everything the render adapter needs for one element in one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementTransform {
    pub position: Vec3,
    /// Euler angles, XYZ order
    pub rotation: Vec3,
    /// Uniform scale for meshes, point size for point clouds
    pub scale: f32,
    pub color: Vec3,
    pub alpha: f32,
}
