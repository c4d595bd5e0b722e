use crate::renderer::RenderError;
use crate::surface::PhysicalSize;
use glam::{Mat4, Vec3};
use stagehand_scene::{BoxGeometry, MeshMaterial};
use std::fmt::Write;

/// One mesh to draw, flattened to world space.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub mesh: String,
    pub world: Mat4,
    pub geometry: BoxGeometry,
    pub material: MeshMaterial,
}

impl DrawItem {
    pub fn world_position(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSubmission {
    pub frame: u64,
    pub viewport: PhysicalSize,
    pub camera_position: Vec3,
    pub aspect: f32,
    pub view: Mat4,
    pub projection: Mat4,
    pub items: Vec<DrawItem>,
}

impl FrameSubmission {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Geometry/material backend that turns a submission into pixels.
pub trait DrawBackend {
    fn submit(&mut self, frame: &FrameSubmission) -> Result<(), RenderError>;
}

/// Text backend: describes each submitted frame instead of drawing it.
///
/// Useful for CLI output, logging, and testing the renderer.
#[derive(Debug, Default)]
pub struct DebugTextBackend {
    frames: u64,
    last: String,
}

impl DebugTextBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames
    }

    /// Description of the most recent frame.
    pub fn last_output(&self) -> &str {
        &self.last
    }

    fn describe(frame: &FrameSubmission) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(
            out,
            "=== Frame {} ({}x{}) ===",
            frame.frame, frame.viewport.width, frame.viewport.height
        )?;
        let eye = frame.camera_position;
        writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) aspect={:.3}",
            eye.x, eye.y, eye.z, frame.aspect
        )?;
        writeln!(out, "Draws: {}", frame.items.len())?;
        for item in &frame.items {
            let p = item.world_position();
            let g = item.geometry;
            writeln!(
                out,
                "  [{}] pos=({:.2}, {:.2}, {:.2}) box={}x{}x{} materials={}",
                item.mesh,
                p.x,
                p.y,
                p.z,
                g.width,
                g.height,
                g.depth,
                describe_material(&item.material)
            )?;
        }
        Ok(out)
    }
}

fn describe_material(material: &MeshMaterial) -> String {
    material
        .distinct()
        .iter()
        .map(|m| match &m.texture {
            Some(tex) => format!("{}({})", m.name, tex.path().display()),
            None => format!("{}({})", m.name, m.color),
        })
        .collect::<Vec<_>>()
        .join(",")
}

impl DrawBackend for DebugTextBackend {
    fn submit(&mut self, frame: &FrameSubmission) -> Result<(), RenderError> {
        self.last = Self::describe(frame).map_err(|e| RenderError::Backend(e.to_string()))?;
        self.frames += 1;
        Ok(())
    }
}
