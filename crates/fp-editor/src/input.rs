//! Input abstraction layer.
//!
//! Normalizes DOM mouse, wheel and keyboard events into a unified
//! `InputEvent` enum consumed by the editor. Pointer positions are in
//! screen pixels relative to the canvas.

use fp_core::geometry::Vec2;

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Platform command key: Ctrl elsewhere, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },

    PointerMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    PointerUp {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    /// Wheel or trackpad scroll at cursor `(x, y)`.
    Wheel {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        modifiers: Modifiers,
    },

    Key {
        key: String,
        modifiers: Modifiers,
        /// Focus is inside a text input, textarea or content-editable.
        editing_text: bool,
    },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, button: PointerButton, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            x,
            y,
            button,
            modifiers,
        }
    }

    pub fn from_pointer_move(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerMove { x, y, modifiers }
    }

    pub fn from_pointer_up(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerUp { x, y, modifiers }
    }

    /// Extract position if this is a pointer or wheel event.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some(Vec2::new(*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
