//! Rendering: owns the output surface, the camera and the scene root, and
//! turns the scene into draw submissions once per frame.
//!
//! # Invariants
//! - The camera never draws with an aspect ratio older than the surface size.
//! - Only the renderer changes the camera's projection parameters.
//! - Drawing goes through the [`DrawBackend`] trait; GPU setup lives behind it.

mod backend;
mod camera;
mod controls;
mod renderer;
mod surface;

pub use backend::{DebugTextBackend, DrawBackend, DrawItem, FrameSubmission};
pub use camera::{CameraConfig, PerspectiveCamera};
pub use controls::{CameraController, OrbitControls};
pub use renderer::{FrameStats, RenderError, Renderer};
pub use surface::{HeadlessSurface, LogicalSize, PhysicalSize, Surface, SurfaceConfig};

pub fn crate_info() -> &'static str {
    "stagehand-render v0.1.0"
}
