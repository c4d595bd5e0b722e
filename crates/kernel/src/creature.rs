use crate::entity::{Entity, EntityCore};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagehand_common::EntityId;
use stagehand_scene::{
    BasicMaterial, BoxGeometry, Color, CubeFace, Mesh, MeshMaterial, TextureSource,
};
use std::path::PathBuf;
use std::rc::Rc;

/// Vertical distance from the head's centre to the body's centre.
pub const BODY_OFFSET_Y: f32 = -1.0;

/// Appearance of a creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureStyle {
    pub skin_color: Color,
    /// Image drawn on the front face of the head.
    pub face_texture: PathBuf,
    /// Body box as width, height, depth.
    pub body_size: [f32; 3],
}

impl Default for CreatureStyle {
    fn default() -> Self {
        Self {
            skin_color: Color(0xe0ac69),
            face_texture: PathBuf::from("textures/face.png"),
            body_size: [1.0, 1.0, 0.5],
        }
    }
}

/// A head on a body. Five head faces and the body share the skin material;
/// the front face carries the face texture.
#[derive(Debug)]
pub struct CreatureEntity {
    core: EntityCore,
    head: Rc<Mesh>,
    body: Rc<Mesh>,
}

impl CreatureEntity {
    pub fn new(id: EntityId, style: &CreatureStyle) -> Self {
        let label = format!("creature-{}", id.0);
        let skin = Rc::new(BasicMaterial::colored("skin", style.skin_color));
        let face = Rc::new(BasicMaterial::textured(
            "face",
            TextureSource::new(style.face_texture.clone()),
        ));

        let head = Rc::new(Mesh::new(
            format!("{label}/head"),
            BoxGeometry::unit(),
            MeshMaterial::with_face(&skin, CubeFace::Front, face),
        ));
        let [w, h, d] = style.body_size;
        let body = Rc::new(
            Mesh::new(
                format!("{label}/body"),
                BoxGeometry::new(w, h, d),
                MeshMaterial::Single(skin),
            )
            .with_offset(Vec3::new(0.0, BODY_OFFSET_Y, 0.0)),
        );

        let mut core = EntityCore::new(id, "creature");
        core.attach_mesh(Rc::clone(&head));
        core.attach_mesh(Rc::clone(&body));
        Self { core, head, body }
    }

    pub fn head(&self) -> &Rc<Mesh> {
        &self.head
    }

    pub fn body(&self) -> &Rc<Mesh> {
        &self.body
    }
}

impl Entity for CreatureEntity {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn kind(&self) -> &'static str {
        "creature"
    }
}
