use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Construction parameters of the perspective camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Aspect used until the first surface reconciliation.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: 2.0,
            near: 0.1,
            far: 5.0,
            position: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraConfig {
    /// Describe the first invalid parameter, if any.
    pub fn problem(&self) -> Option<String> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Some(format!("fov {} outside (0, 180)", self.fov_degrees));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Some(format!("aspect {} must be positive", self.aspect));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Some(format!(
                "clip planes near={} far={} must satisfy 0 < near < far",
                self.near, self.far
            ));
        }
        None
    }
}

/// Perspective camera looking from `position` at `target`.
///
/// Field of view and clip planes are fixed at construction. The aspect is
/// set by the renderer when the surface changes size; the projection matrix
/// is cached and only rebuilt by [`PerspectiveCamera::update_projection`].
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    position: Vec3,
    target: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            fov_degrees: config.fov_degrees,
            aspect: config.aspect,
            near: config.near,
            far: config.far,
            position: config.position,
            target: config.target,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub(crate) fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Rebuild the cached projection from fov, aspect and clip planes.
    pub(crate) fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
