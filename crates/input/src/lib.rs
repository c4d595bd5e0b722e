//! Input events delivered by the host environment.
//!
//! # Invariants
//! - Events are host-agnostic; device polling stays in the host.
//! - Only camera controllers consume them. Entities never see raw input.

pub mod event;

pub use event::{InputEvent, PointerButton};

pub fn crate_info() -> &'static str {
    "stagehand-input v0.1.0"
}
