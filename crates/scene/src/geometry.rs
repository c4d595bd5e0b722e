use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box centred on its local origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// 1×1×1 cube.
    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * 0.5
    }

    /// Vertex and index counts for a box with one quad per face and
    /// unshared corners, so each face can carry its own material.
    pub fn vertex_count(&self) -> u32 {
        24
    }

    pub fn index_count(&self) -> u32 {
        36
    }
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::unit()
    }
}
