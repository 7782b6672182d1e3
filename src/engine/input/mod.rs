//! Backend-agnostic input events.
//!
//! The display collaborator owns the actual event loop and device
//! handling; it forwards presses here in the same document coordinate
//! space the visuals live in. Only press transitions trigger impulses,
//! releases are delivered but ignored by the scene.

use nalgebra::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    Pressed,
    Released,
}

impl PressState {
    pub fn is_pressed(&self) -> bool {
        matches!(self, PressState::Pressed)
    }
}

/// A keyboard event. The scene reacts to any key, so no key code is carried.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub state: PressState,
    /// Seconds since the display collaborator started, as reported by it.
    pub timestamp: f64,
}

/// A pointer event with its position in document space.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub state: PressState,
    pub position: Vector2<f32>,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
}
