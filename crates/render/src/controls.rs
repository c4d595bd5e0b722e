//! Interactive camera controllers.

use crate::camera::PerspectiveCamera;
use glam::Vec3;
use stagehand_input::{InputEvent, PointerButton};
use std::f32::consts::PI;

/// Mutates the camera from host input. The renderer calls `update` once per
/// frame, after surface reconciliation and before drawing.
pub trait CameraController {
    fn handle_input(&mut self, _event: &InputEvent) {}

    fn update(&mut self, camera: &mut PerspectiveCamera);
}

/// Keeps the polar angle away from the poles so `look_at` stays defined.
const POLAR_MARGIN: f32 = 1e-3;

/// Orbit control that rotates the camera around a target point.
///
/// Dragging with the primary button orbits, the wheel zooms. Input is
/// accumulated between frames and applied in `update`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// The point to orbit around.
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per logical pixel of drag.
    pub rotate_speed: f32,
    /// Fraction of the distance removed per wheel line.
    pub zoom_speed: f32,
    /// Degrees of azimuth added every frame, independent of input.
    pub auto_rotate_degrees: f32,

    dragging: bool,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        if min_distance.is_nan() || max_distance.is_nan() || min_distance > max_distance {
            tracing::warn!(min_distance, max_distance, "orbit zoom limits out of order");
        }
        Self {
            target,
            min_distance,
            max_distance,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            auto_rotate_degrees: 0.0,
            dragging: false,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 0.0,
        }
    }

    pub fn with_auto_rotate(mut self, degrees_per_frame: f32) -> Self {
        self.auto_rotate_degrees = degrees_per_frame;
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Zoom limits as an ordered pair. A NaN limit is ignored and swapped
    /// limits are put back in order, so a misconfigured control still
    /// zooms instead of failing mid-frame.
    pub fn distance_bounds(&self) -> (f32, f32) {
        let lo = if self.min_distance.is_nan() {
            0.0
        } else {
            self.min_distance
        };
        let hi = if self.max_distance.is_nan() {
            f32::INFINITY
        } else {
            self.max_distance
        };
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }
}

impl CameraController for OrbitControls {
    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown(PointerButton::Primary) => self.dragging = true,
            InputEvent::PointerUp(PointerButton::Primary) => self.dragging = false,
            InputEvent::PointerMove { dx, dy } if self.dragging => {
                self.pending_azimuth += dx * self.rotate_speed;
                self.pending_polar += dy * self.rotate_speed;
            }
            InputEvent::Wheel { delta } => self.pending_zoom += delta,
            _ => {}
        }
    }

    fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position() - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        azimuth -= self.pending_azimuth + self.auto_rotate_degrees.to_radians();
        polar = (polar - self.pending_polar).clamp(POLAR_MARGIN, PI - POLAR_MARGIN);
        let (min_distance, max_distance) = self.distance_bounds();
        let radius = (radius * (1.0 - self.zoom_speed).powf(self.pending_zoom))
            .clamp(min_distance, max_distance);

        let offset = Vec3::new(
            radius * polar.sin() * azimuth.sin(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.cos(),
        );
        camera.set_position(self.target + offset);
        camera.look_at(self.target);

        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_zoom = 0.0;
    }
}
