use crate::node::{NodeHandle, TransformNode};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Errors from scene root mutation.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("node '{0}' is already attached to a scene")]
    AlreadyAttached(String),
    #[error("node '{0}' is not attached to this scene")]
    NotAttached(String),
}

/// The scene root: top-level attachments, drawn in insertion order.
///
/// Entries are weak. A node dropped while still attached leaves a dead
/// entry that [`Scene::prune`] removes; it is never drawn.
#[derive(Debug, Default)]
pub struct Scene {
    attachments: Vec<Weak<RefCell<TransformNode>>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a node at the root.
    pub fn add(&mut self, node: &NodeHandle) -> Result<(), SceneError> {
        let mut inner = node.borrow_mut();
        if inner.is_attached() {
            return Err(SceneError::AlreadyAttached(inner.name().to_owned()));
        }
        inner.set_attached(true);
        self.attachments.push(node.downgrade());
        tracing::debug!(node = inner.name(), "node attached to scene");
        Ok(())
    }

    /// Detach a node from the root.
    pub fn remove(&mut self, node: &NodeHandle) -> Result<(), SceneError> {
        let Some(index) = self.attachments.iter().position(|w| node.is(w)) else {
            return Err(SceneError::NotAttached(node.borrow().name().to_owned()));
        };
        self.attachments.remove(index);
        let mut inner = node.borrow_mut();
        inner.set_attached(false);
        tracing::debug!(node = inner.name(), "node detached from scene");
        Ok(())
    }

    pub fn contains(&self, node: &NodeHandle) -> bool {
        self.attachments.iter().any(|w| node.is(w))
    }

    /// Number of root entries, including dead ones not yet pruned.
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// Live root nodes in draw order.
    pub fn nodes(&self) -> impl Iterator<Item = Rc<RefCell<TransformNode>>> + '_ {
        self.attachments.iter().filter_map(Weak::upgrade)
    }

    /// Total meshes reachable from live root nodes.
    pub fn renderable_count(&self) -> usize {
        let mut count = 0;
        for node in self.nodes() {
            count += node.borrow().mesh_count();
        }
        count
    }

    /// Names of all reachable meshes, in draw order.
    pub fn mesh_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for node in self.nodes() {
            let node = node.borrow();
            names.extend(node.meshes().iter().map(|m| m.name.clone()));
        }
        names
    }

    /// Drop entries whose node no longer exists. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.attachments.len();
        self.attachments.retain(|w| w.strong_count() > 0);
        before - self.attachments.len()
    }
}

impl Drop for Scene {
    /// Releases surviving nodes so they can join another scene.
    fn drop(&mut self) {
        for node in self.attachments.drain(..).filter_map(|w| w.upgrade()) {
            match node.try_borrow_mut() {
                Ok(mut inner) => inner.set_attached(false),
                Err(_) => tracing::warn!("node borrowed while its scene was dropped"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxGeometry;
    use crate::material::{BasicMaterial, Color, MeshMaterial};
    use crate::node::Mesh;

    fn node_with_meshes(name: &str, count: usize) -> NodeHandle {
        let node = NodeHandle::new(name);
        let material = Rc::new(BasicMaterial::colored("m", Color(0xffffff)));
        for i in 0..count {
            node.borrow_mut().attach_mesh(Rc::new(Mesh::new(
                format!("{name}/{i}"),
                BoxGeometry::unit(),
                MeshMaterial::Single(Rc::clone(&material)),
            )));
        }
        node
    }

    #[test]
    fn scene_starts_empty() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.renderable_count(), 0);
    }

    #[test]
    fn add_and_remove_node() {
        let mut scene = Scene::new();
        let node = node_with_meshes("a", 2);
        scene.add(&node).unwrap();
        assert!(scene.contains(&node));
        assert!(node.borrow().is_attached());
        assert_eq!(scene.renderable_count(), 2);

        scene.remove(&node).unwrap();
        assert!(!scene.contains(&node));
        assert!(!node.borrow().is_attached());
        assert_eq!(scene.renderable_count(), 0);
    }

    #[test]
    fn node_attaches_to_one_scene_only() {
        let mut first = Scene::new();
        let mut second = Scene::new();
        let node = node_with_meshes("a", 1);
        first.add(&node).unwrap();
        assert!(matches!(
            second.add(&node),
            Err(SceneError::AlreadyAttached(_))
        ));
        assert!(matches!(first.add(&node), Err(SceneError::AlreadyAttached(_))));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn removing_unattached_node_fails() {
        let mut scene = Scene::new();
        let node = node_with_meshes("a", 1);
        assert!(matches!(scene.remove(&node), Err(SceneError::NotAttached(_))));
    }

    #[test]
    fn removing_from_the_wrong_scene_keeps_flag() {
        let mut first = Scene::new();
        let mut second = Scene::new();
        let node = node_with_meshes("a", 1);
        first.add(&node).unwrap();
        assert!(second.remove(&node).is_err());
        assert!(node.borrow().is_attached());
        assert!(first.contains(&node));
    }

    #[test]
    fn dropped_node_is_not_drawn_and_pruned() {
        let mut scene = Scene::new();
        let kept = node_with_meshes("kept", 1);
        {
            let dropped = node_with_meshes("dropped", 3);
            scene.add(&dropped).unwrap();
        }
        scene.add(&kept).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.renderable_count(), 1);
        assert_eq!(scene.prune(), 1);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn mesh_names_follow_insertion_order() {
        let mut scene = Scene::new();
        let a = node_with_meshes("a", 1);
        let b = node_with_meshes("b", 2);
        scene.add(&b).unwrap();
        scene.add(&a).unwrap();
        assert_eq!(scene.mesh_names(), vec!["b/0", "b/1", "a/0"]);
    }

    #[test]
    fn dropping_scene_releases_live_nodes() {
        let node = node_with_meshes("kept", 1);
        {
            let mut scene = Scene::new();
            scene.add(&node).unwrap();
            let dead = node_with_meshes("dead", 1);
            scene.add(&dead).unwrap();
            drop(dead);
        }
        assert!(!node.borrow().is_attached());

        let mut other = Scene::new();
        other.add(&node).unwrap();
        assert!(other.contains(&node));
    }
}
