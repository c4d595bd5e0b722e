use crate::geometry::BoxGeometry;
use crate::material::MeshMaterial;
use glam::{Mat4, Vec3};
use stagehand_common::Transform;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// A drawable box: geometry, material assignment, and an offset from the
/// node it hangs under.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: BoxGeometry,
    pub material: MeshMaterial,
    pub offset: Vec3,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: BoxGeometry, material: MeshMaterial) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.offset)
    }
}

/// Positionable, rotatable node that parents meshes.
///
/// Holds no behaviour beyond its transform and child list. The `attached`
/// flag is maintained by [`crate::Scene`].
#[derive(Debug)]
pub struct TransformNode {
    name: String,
    transform: Transform,
    children: Vec<Rc<Mesh>>,
    attached: bool,
}

impl TransformNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            children: Vec::new(),
            attached: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.transform.yaw_degrees()
    }

    pub fn rotate_yaw(&mut self, delta_degrees: f32) {
        self.transform.rotate_yaw(delta_degrees);
    }

    /// Attach a mesh under this node. Returns false if that exact mesh is
    /// already a child.
    pub fn attach_mesh(&mut self, mesh: Rc<Mesh>) -> bool {
        if self.children.iter().any(|m| Rc::ptr_eq(m, &mesh)) {
            return false;
        }
        self.children.push(mesh);
        true
    }

    /// Detach a mesh. Returns false if it was not a child.
    pub fn detach_mesh(&mut self, mesh: &Rc<Mesh>) -> bool {
        let before = self.children.len();
        self.children.retain(|m| !Rc::ptr_eq(m, mesh));
        self.children.len() != before
    }

    pub fn meshes(&self) -> &[Rc<Mesh>] {
        &self.children
    }

    pub fn mesh_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }
}

/// Owning handle to a transform node.
///
/// Not `Clone`: the owner (usually an entity) is the only strong reference.
/// The scene keeps a [`Weak`] obtained through [`NodeHandle::downgrade`].
#[derive(Debug)]
pub struct NodeHandle(Rc<RefCell<TransformNode>>);

impl NodeHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(TransformNode::new(name))))
    }

    /// Wrap a single loose mesh so it can be placed at the scene root.
    pub fn from_mesh(mesh: Rc<Mesh>) -> Self {
        let handle = Self::new(mesh.name.clone());
        handle.borrow_mut().attach_mesh(mesh);
        handle
    }

    pub fn borrow(&self) -> Ref<'_, TransformNode> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, TransformNode> {
        self.0.borrow_mut()
    }

    pub fn downgrade(&self) -> Weak<RefCell<TransformNode>> {
        Rc::downgrade(&self.0)
    }

    /// True if `weak` refers to this node.
    pub fn is(&self, weak: &Weak<RefCell<TransformNode>>) -> bool {
        std::ptr::eq(weak.as_ptr(), Rc::as_ptr(&self.0))
    }
}
