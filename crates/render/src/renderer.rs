use crate::backend::{DrawBackend, DrawItem, FrameSubmission};
use crate::camera::{CameraConfig, PerspectiveCamera};
use crate::controls::CameraController;
use crate::surface::{self, PhysicalSize, Surface};
use stagehand_input::InputEvent;
use stagehand_scene::{NodeHandle, Scene, SceneError};

/// Errors from renderer construction and drawing.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("output surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("invalid camera: {0}")]
    InvalidCamera(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// What one call to [`Renderer::render`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub draws: usize,
    /// New backing size if the surface was resized this frame.
    pub resized: Option<PhysicalSize>,
}

/// Owns the output surface, the camera and the scene root.
///
/// Meshes enter the scene only through [`Renderer::add_mesh`]; the scene
/// holds non-owning references to them.
pub struct Renderer<S: Surface, B: DrawBackend> {
    surface: S,
    backend: B,
    camera: PerspectiveCamera,
    scene: Scene,
    controller: Option<Box<dyn CameraController>>,
    frames: u64,
}

impl<S: Surface, B: DrawBackend> Renderer<S, B> {
    /// Fails if the surface cannot be drawn to or the camera is malformed.
    pub fn new(surface: S, backend: B, camera: &CameraConfig) -> Result<Self, RenderError> {
        surface::validate(&surface)?;
        if let Some(problem) = camera.problem() {
            return Err(RenderError::InvalidCamera(problem));
        }
        let logical = surface.logical_size();
        tracing::info!(
            width = logical.width,
            height = logical.height,
            scale = surface.scale_factor(),
            fov = camera.fov_degrees,
            "renderer created"
        );
        Ok(Self {
            surface,
            backend,
            camera: PerspectiveCamera::new(camera),
            scene: Scene::new(),
            controller: None,
            frames: 0,
        })
    }

    /// Attach a top-level node to the scene root.
    pub fn add_mesh(&mut self, node: &NodeHandle) -> Result<(), SceneError> {
        self.scene.add(node)
    }

    /// Detach a top-level node from the scene root.
    pub fn remove_mesh(&mut self, node: &NodeHandle) -> Result<(), SceneError> {
        self.scene.remove(node)
    }

    pub fn set_controller(&mut self, controller: Box<dyn CameraController>) {
        self.controller = Some(controller);
    }

    /// Forward a host input event to the camera controller, if any.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if let Some(controller) = self.controller.as_mut() {
            controller.handle_input(event);
        }
    }

    /// Draw one frame: reconcile the surface size, update the camera
    /// controller, then submit the scene.
    pub fn render(&mut self) -> Result<FrameStats, RenderError> {
        let resized = surface::reconcile(&mut self.surface, &mut self.camera);
        if let Some(size) = resized {
            tracing::debug!(
                width = size.width,
                height = size.height,
                aspect = self.camera.aspect(),
                "surface resized"
            );
        }

        if let Some(controller) = self.controller.as_mut() {
            controller.update(&mut self.camera);
        }

        let pruned = self.scene.prune();
        if pruned > 0 {
            tracing::warn!(pruned, "dropped scene entries whose node no longer exists");
        }

        let submission = self.build_submission();
        let draws = submission.items.len();
        self.backend.submit(&submission)?;
        self.frames += 1;

        Ok(FrameStats {
            frame: submission.frame,
            draws,
            resized,
        })
    }

    fn build_submission(&self) -> FrameSubmission {
        let mut items = Vec::new();
        for node in self.scene.nodes() {
            let node = node.borrow();
            let parent = node.transform().matrix();
            for mesh in node.meshes() {
                items.push(DrawItem {
                    mesh: mesh.name.clone(),
                    world: parent * mesh.local_matrix(),
                    geometry: mesh.geometry,
                    material: mesh.material.clone(),
                });
            }
        }
        FrameSubmission {
            frame: self.frames,
            viewport: self.surface.backing_size(),
            camera_position: self.camera.position(),
            aspect: self.camera.aspect(),
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            items,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Frames successfully submitted so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
