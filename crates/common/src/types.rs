use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a simulated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity ids in increasing order, starting at 0.
///
/// A generator never returns the same id twice until it is reset. Once
/// `u64::MAX` has been handed out or reserved it is exhausted and
/// `next_id` returns `None`. The simulation owns one; tests reset it to get
/// predictable ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: Option<u64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: Some(0) }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id, or `None` if the id space is used up.
    pub fn next_id(&mut self) -> Option<EntityId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(EntityId(id))
    }

    /// The id the next call to `next_id` will return.
    pub fn peek(&self) -> Option<EntityId> {
        self.next.map(EntityId)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Make sure `id` is never handed out later, for ids chosen by the caller.
    pub fn reserve(&mut self, id: EntityId) {
        match self.next {
            Some(next) if next <= id.0 => self.next = id.0.checked_add(1),
            _ => {}
        }
    }

    /// Restart numbering from 0.
    pub fn reset(&mut self) {
        self.next = Some(0);
    }
}

/// Facing of an entity on the ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The facing after a counter-clockwise quarter turn.
    pub fn turned_left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// Unit step on the XZ plane; Up points away from the default camera (-Z).
    pub fn step(self) -> Vec3 {
        match self {
            Self::Up => Vec3::NEG_Z,
            Self::Down => Vec3::Z,
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
        }
    }
}

/// Spatial transform of a scene node: position and yaw.
///
/// Yaw is kept in degrees and normalised to `[0, 360)` so that repeated
/// quarter turns land exactly back on their starting value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    yaw_degrees: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn set_yaw_degrees(&mut self, degrees: f32) {
        self.yaw_degrees = degrees.rem_euclid(360.0);
    }

    /// Rotate about the Y axis by `delta` degrees.
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.set_yaw_degrees(self.yaw_degrees + delta);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position)
    }
}
