//! Scene graph: transform nodes, the meshes they parent, and the scene root.
//!
//! # Invariants
//! - A transform node is attached to at most one scene root at a time.
//! - The scene root holds non-owning references; owners keep nodes alive.
//! - Mesh identity is pointer identity of its `Rc`.

pub mod geometry;
pub mod graph;
pub mod material;
pub mod node;

pub use geometry::BoxGeometry;
pub use graph::{Scene, SceneError};
pub use material::{BasicMaterial, Color, CubeFace, MeshMaterial, TextureSource};
pub use node::{Mesh, NodeHandle, TransformNode};

pub fn crate_info() -> &'static str {
    "stagehand-scene v0.1.0"
}
