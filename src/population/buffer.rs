use crate::math::Mat4;
use super::ElementTransform;

/// Vertex layout of a population's frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferLayout {
    /// position(3) + size(1) + alpha(1) + color(3) = 8 floats per point
    Points,
    /// model matrix(16, column-major) + color(3) + alpha(1) = 20 floats per instance
    Instances,
}

impl BufferLayout {
    pub const fn stride(self) -> usize {
        match self {
            BufferLayout::Points => 8,
            BufferLayout::Instances => 20,
        }
    }
}

/// Per-population transform arena, allocated once and overwritten every frame
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    layout: BufferLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: BufferLayout, count: usize) -> Self {
        Self {
            layout,
            data: vec![0.0; count * layout.stride()],
        }
    }

    pub fn layout(&self) -> BufferLayout {
        self.layout
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len() / self.layout.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Overwrite slot `index` with `t`
    pub fn write(&mut self, index: usize, t: &ElementTransform) {
        let stride = self.layout.stride();
        let slot = &mut self.data[index * stride..(index + 1) * stride];

        match self.layout {
            BufferLayout::Points => {
                slot[0..3].copy_from_slice(&t.position.to_array());
                slot[3] = t.scale;
                slot[4] = t.alpha;
                slot[5..8].copy_from_slice(&t.color.to_array());
            }
            BufferLayout::Instances => {
                let model = Mat4::from_transform(t.position, t.rotation, t.scale);
                slot[0..16].copy_from_slice(model.as_slice());
                slot[16..19].copy_from_slice(&t.color.to_array());
                slot[19] = t.alpha;
            }
        }
    }

    /// Floats for one element
    pub fn element(&self, index: usize) -> &[f32] {
        let stride = self.layout.stride();
        &self.data[index * stride..(index + 1) * stride]
    }

    /// The whole buffer, ready for upload
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
