use serde::{Deserialize, Serialize};

/// Pointer buttons a controller may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A pointer or wheel event forwarded from the host.
///
/// Deltas are in logical pixels; wheel deltas are in lines, positive away
/// from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    /// Pointer moved by a delta since the previous move event.
    PointerMove { dx: f32, dy: f32 },
    Wheel { delta: f32 },
}

impl InputEvent {
    /// True for events that change pointer button state.
    pub fn is_button(&self) -> bool {
        matches!(self, Self::PointerDown(_) | Self::PointerUp(_))
    }
}
