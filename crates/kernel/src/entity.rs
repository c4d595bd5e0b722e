use glam::Vec3;
use stagehand_common::{Direction, EntityId};
use stagehand_scene::{Mesh, NodeHandle};
use std::rc::Rc;

/// Degrees added to the pivot's yaw by one left turn.
pub const QUARTER_TURN_DEGREES: f32 = -90.0;

/// State every entity carries: id, facing, and the pivot its geometry
/// hangs from.
///
/// The pivot is owned here and nowhere else. The simulation attaches it to
/// the scene root while the entity is registered.
#[derive(Debug)]
pub struct EntityCore {
    id: EntityId,
    direction: Direction,
    pivot: NodeHandle,
}

impl EntityCore {
    /// `label` names the pivot in logs and debug output.
    pub fn new(id: EntityId, label: &str) -> Self {
        Self {
            id,
            direction: Direction::default(),
            pivot: NodeHandle::new(format!("{label}-{}", id.0)),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pivot(&self) -> &NodeHandle {
        &self.pivot
    }

    pub fn position(&self) -> Vec3 {
        self.pivot.borrow().position()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.pivot.borrow_mut().set_position(position);
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.pivot.borrow().yaw_degrees()
    }

    /// Returns false if the mesh was already attached.
    pub fn attach_mesh(&mut self, mesh: Rc<Mesh>) -> bool {
        self.pivot.borrow_mut().attach_mesh(mesh)
    }

    /// Returns false if the mesh was not attached.
    pub fn detach_mesh(&mut self, mesh: &Rc<Mesh>) -> bool {
        self.pivot.borrow_mut().detach_mesh(mesh)
    }

    /// Quarter turn counter-clockwise: yaw −90° and facing rotates with it.
    pub fn turn_left(&mut self) {
        self.pivot.borrow_mut().rotate_yaw(QUARTER_TURN_DEGREES);
        self.direction = self.direction.turned_left();
    }
}

/// A unit of simulation with a pivot in the scene.
///
/// Implementors provide access to their [`EntityCore`]; everything else has
/// a default. `update` runs once per frame with elapsed seconds.
pub trait Entity {
    fn core(&self) -> &EntityCore;

    fn core_mut(&mut self) -> &mut EntityCore;

    /// Short name of the variant, used in logs.
    fn kind(&self) -> &'static str {
        "entity"
    }

    fn id(&self) -> EntityId {
        self.core().id()
    }

    fn pivot(&self) -> &NodeHandle {
        self.core().pivot()
    }

    fn update(&mut self, _time: f64) {}

    /// Direction-driven translation. Left unspecified; the default does
    /// nothing and variants may override.
    fn move_step(&mut self) {}

    fn turn_left(&mut self) {
        self.core_mut().turn_left();
    }
}

/// Entity with no fixed geometry; callers attach meshes themselves.
#[derive(Debug)]
pub struct BasicEntity {
    core: EntityCore,
}

impl BasicEntity {
    pub fn new(id: EntityId) -> Self {
        Self {
            core: EntityCore::new(id, "entity"),
        }
    }

    pub fn with_meshes(id: EntityId, meshes: impl IntoIterator<Item = Rc<Mesh>>) -> Self {
        let mut entity = Self::new(id);
        for mesh in meshes {
            entity.core.attach_mesh(mesh);
        }
        entity
    }
}

impl Entity for BasicEntity {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}
