//! Input abstraction layer.
//!
//! Host events (mouse, touch, keyboard, the inline text editor) are
//! normalized into `InputEvent`s. Pointer coordinates are in screen units
//! relative to the canvas origin; the editor maps them into the scene.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Self::NONE
    };

    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, ⌘ on macOS.
    pub fn cmd(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Any modifier that extends a selection instead of replacing it.
    pub fn additive(&self) -> bool {
        self.shift || self.cmd()
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, modifiers: Modifiers },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    /// Pointer left the canvas.
    PointerLeave,
    /// Wheel / trackpad scroll. The canvas does not zoom or pan on wheel.
    Wheel { dx: f32, dy: f32 },
    Key { key: String, modifiers: Modifiers },
    /// Full current value of the inline text editor.
    TextChanged { text: String },
    /// The inline text editor lost focus.
    Blur,
}

impl InputEvent {
    pub fn key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.into(),
            modifiers,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some((*x, *y))
            }
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. } | Self::Key { modifiers, .. } => *modifiers,
            _ => Modifiers::NONE,
        }
    }
}
