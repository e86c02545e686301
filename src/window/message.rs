//! Messages published by a game window

use std::fmt;

use crate::geometry::{Position, Size};
use crate::input::{ButtonClick, EventKey};

use super::render::RenderState;

/// A window lifecycle or input notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    Closed,
    Resized(Size),
    LostFocus,
    GainedFocus,
    TextEntered(char),
    KeyPressed(EventKey),
    KeyReleased(EventKey),
    MouseButtonPressed(ButtonClick),
    MouseButtonReleased(ButtonClick),
    MouseMoved(Position),
    MouseWheelMoved { delta: i32, position: Position },
    MouseEntered,
    MouseLeft,
    /// The render loop released the surface and exited
    Stopped,
    /// The render loop released the surface and is waiting for requests
    Paused,
    /// The render loop holds the surface and presents frames
    Running,
    /// The render loop is running but has no frame to present
    Spinning,
}

impl WindowMessage {
    /// Symbolic identifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::Closed => "game window closed",
            Self::Resized(_) => "game window resized",
            Self::LostFocus => "game window lost focus",
            Self::GainedFocus => "game window gained focus",
            Self::TextEntered(_) => "game window text entered",
            Self::KeyPressed(_) => "game window key pressed",
            Self::KeyReleased(_) => "game window key released",
            Self::MouseButtonPressed(_) => "game window mouse button pressed",
            Self::MouseButtonReleased(_) => "game window mouse button released",
            Self::MouseMoved(_) => "game window mouse moved",
            Self::MouseWheelMoved { .. } => "game window mouse wheel moved",
            Self::MouseEntered => "game window mouse entered",
            Self::MouseLeft => "game window mouse left",
            Self::Stopped => "game window stopped",
            Self::Paused => "game window paused",
            Self::Running => "game window running",
            Self::Spinning => "game window spinning",
        }
    }

    /// The message announcing a render state
    pub fn for_state(state: RenderState) -> Self {
        match state {
            RenderState::Stopped => Self::Stopped,
            RenderState::Paused => Self::Paused,
            RenderState::Running => Self::Running,
        }
    }
}

impl fmt::Display for WindowMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
