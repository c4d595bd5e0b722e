//! Simulation kernel: entities, their lifecycle against the renderer's scene,
//! and the frame loop that updates them and draws.
//!
//! # Invariants
//! - An entity is registered iff its pivot is attached to the scene root.
//! - Within a frame, every entity updates before the scene is drawn.
//! - No error escapes a frame; failures are logged and recorded as events.

pub mod config;
pub mod creature;
pub mod cube;
pub mod entity;
pub mod scheduler;
pub mod simulation;

pub use config::{ConfigError, SimulationConfig};
pub use creature::{CreatureEntity, CreatureStyle};
pub use cube::CubeEntity;
pub use entity::{BasicEntity, Entity, EntityCore};
pub use scheduler::{
    FixedStepScheduler, FrameScheduler, RealtimeScheduler, SchedulerError, StopToken,
};
pub use simulation::{
    EVENT_LOG_CAPACITY, Simulation, SimulationError, SimulationEvent, SimulationState,
};

pub fn crate_info() -> &'static str {
    "stagehand-kernel v0.1.0"
}
