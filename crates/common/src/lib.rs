//! Shared types for the stagehand runtime: entity ids, facing, transforms.

mod types;

pub use types::{Direction, EntityId, IdGenerator, Transform};

pub fn crate_info() -> &'static str {
    "stagehand-common v0.1.0"
}
