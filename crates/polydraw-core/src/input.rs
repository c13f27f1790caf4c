//! Pointer and keyboard events delivered by the viewport.

use crate::events::PointerKind;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    /// Release delivered after the pointer left the canvas surface.
    UpOutside {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

impl PointerEvent {
    /// Left-button press at a screen position.
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Left-button release at a screen position.
    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Pointer motion to a screen position.
    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    /// Screen position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::UpOutside { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Scroll { position, .. } => *position,
        }
    }

    /// Subscription kind this event is dispatched under, if any.
    pub fn kind(&self) -> Option<PointerKind> {
        match self {
            PointerEvent::Down { .. } => Some(PointerKind::Down),
            PointerEvent::Up { .. } => Some(PointerKind::Up),
            PointerEvent::UpOutside { .. } => Some(PointerKind::UpOutside),
            PointerEvent::Move { .. } => Some(PointerKind::Move),
            PointerEvent::Scroll { .. } => None,
        }
    }
}

/// Keyboard event type, keyed by the platform's key name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    /// Name of the key involved.
    pub fn key(&self) -> &str {
        match self {
            KeyEvent::Pressed(key) | KeyEvent::Released(key) => key,
        }
    }
}
