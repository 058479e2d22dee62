//! Input event types consumed by the editor.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in canvas-local coordinates.
///
/// `Leave` covers the pointer exiting the canvas with a button held; the
/// editor treats it exactly like `Up` at the last known position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Leave,
}

/// Keyboard keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
}
