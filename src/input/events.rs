//! Input event descriptors
//!
//! These are immutable value types used as lookup keys by handlers. Equality
//! and hashing are structural.

use std::fmt;

use crate::geometry::Position;

/// Keyboard key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Modifier keys
    LControl,
    LShift,
    LAlt,
    /// Left OS key (Windows, Command, Super)
    LSystem,
    RControl,
    RShift,
    RAlt,
    /// Right OS key (Windows, Command, Super)
    RSystem,

    // Punctuation
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Period,
    Quote,
    Slash,
    Backslash,
    Tilde,
    Equal,
    Dash,

    // Common keys
    Escape,
    Menu,
    Space,
    Enter,
    Backspace,
    Tab,
    PageUp,
    PageDown,
    End,
    Home,
    Insert,
    Delete,
    Pause,

    // Numpad
    Add,
    Subtract,
    Multiply,
    Divide,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,

    /// A physical key with no mapping above
    Other,

    /// Wildcard for "any key". An [`EventKey`] with this code matches on its
    /// modifier flags only.
    Modifier,
}

/// Keyboard modifier flags held during a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub control: bool,
    pub shift: bool,
    /// OS key (Windows, Command, Super)
    pub system: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self {
        alt: false,
        control: false,
        shift: false,
        system: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CONTROL: Self = Self {
        control: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    pub const SYSTEM: Self = Self {
        system: true,
        ..Self::NONE
    };

    /// Returns true if no modifier is held
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self {
            alt: self.alt || other.alt,
            control: self.control || other.control,
            shift: self.shift || other.shift,
            system: self.system || other.system,
        }
    }
}

/// A key chord: one key plus the modifiers held, pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    /// `true` for a press, `false` for a release
    pub pressed: bool,
}

impl EventKey {
    pub const fn new(code: KeyCode, modifiers: Modifiers, pressed: bool) -> Self {
        Self {
            code,
            modifiers,
            pressed,
        }
    }

    /// A press of `code` with no modifiers
    pub const fn pressed(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE, true)
    }

    /// A release of `code` with no modifiers
    pub const fn released(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE, false)
    }

    /// Same event with the given modifiers held
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The modifier-only twin of this event: same flags, any key
    pub const fn modifier_only(self) -> Self {
        Self::new(KeyCode::Modifier, self.modifiers, self.pressed)
    }

    /// Returns true if this event ignores the physical key
    pub fn is_modifier_only(&self) -> bool {
        self.code == KeyCode::Modifier
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            alt,
            control,
            shift,
            system,
        } = self.modifiers;
        write!(
            f,
            "{:?} (alt: {alt}, control: {control}, shift: {shift}, system: {system}, pressed: {})",
            self.code, self.pressed
        )
    }
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    /// The wheel button
    Middle,
    /// First extra button (usually "back")
    XButton1,
    /// Second extra button (usually "forward")
    XButton2,
}

/// A mouse button going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventButton {
    pub button: MouseButton,
    /// `true` for a press, `false` for a release
    pub pressed: bool,
}

impl EventButton {
    pub const fn pressed(button: MouseButton) -> Self {
        Self {
            button,
            pressed: true,
        }
    }

    pub const fn released(button: MouseButton) -> Self {
        Self {
            button,
            pressed: false,
        }
    }
}

/// Payload handed to mouse button callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonClick {
    pub event: EventButton,
    /// Cursor position when the button changed state
    pub position: Position,
}

/// Cursor moved inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMoved {
    pub position: Position,
}

/// Vertical wheel movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelMoved {
    /// Number of notches, positive away from the user
    pub delta: i32,
    /// Cursor position when the wheel moved
    pub position: Position,
}

/// A decoded text character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEntered {
    pub character: char,
}
