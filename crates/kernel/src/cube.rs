use crate::entity::{Entity, EntityCore};
use stagehand_common::EntityId;
use stagehand_scene::{BasicMaterial, BoxGeometry, Color, Mesh, MeshMaterial};
use std::rc::Rc;

pub const CUBE_COLOR: Color = Color(0x44aa88);

/// A single flat-coloured unit cube, optionally spinning about Y.
#[derive(Debug)]
pub struct CubeEntity {
    core: EntityCore,
    mesh: Rc<Mesh>,
    spin_degrees_per_second: f32,
}

impl CubeEntity {
    pub fn new(id: EntityId) -> Self {
        let material = Rc::new(BasicMaterial::colored("cube", CUBE_COLOR));
        let mesh = Rc::new(Mesh::new(
            format!("cube-{}", id.0),
            BoxGeometry::unit(),
            MeshMaterial::Single(material),
        ));
        let mut core = EntityCore::new(id, "cube");
        core.attach_mesh(Rc::clone(&mesh));
        Self {
            core,
            mesh,
            spin_degrees_per_second: 0.0,
        }
    }

    pub fn with_spin(mut self, degrees_per_second: f32) -> Self {
        self.spin_degrees_per_second = degrees_per_second;
        self
    }

    pub fn mesh(&self) -> &Rc<Mesh> {
        &self.mesh
    }
}

impl Entity for CubeEntity {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn kind(&self) -> &'static str {
        "cube"
    }

    /// Yaw follows elapsed time, so the spin is frame-rate independent.
    fn update(&mut self, time: f64) {
        if self.spin_degrees_per_second == 0.0 {
            return;
        }
        let yaw = (time * f64::from(self.spin_degrees_per_second)).rem_euclid(360.0);
        self.core
            .pivot()
            .borrow_mut()
            .transform_mut()
            .set_yaw_degrees(yaw as f32);
    }
}
