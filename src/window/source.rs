//! Decoded native events and where they come from

use std::collections::VecDeque;

use crate::geometry::{Position, Size};
use crate::input::{KeyCode, Modifiers, MouseButton};

/// A window or input event, already decoded from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Closed,
    Resized(Size),
    LostFocus,
    GainedFocus,
    KeyPressed {
        code: KeyCode,
        modifiers: Modifiers,
    },
    KeyReleased {
        code: KeyCode,
        modifiers: Modifiers,
    },
    TextEntered(char),
    MouseButtonPressed {
        button: MouseButton,
        position: Position,
    },
    MouseButtonReleased {
        button: MouseButton,
        position: Position,
    },
    MouseMoved(Position),
    MouseWheelMoved {
        delta: i32,
        position: Position,
    },
    MouseEntered,
    MouseLeft,
}

/// Produces events on demand
pub trait EventSource {
    /// Next pending event, or `None` once the queue is drained
    fn poll_event(&mut self) -> Option<Event>;
}

/// Hand-fed event queue, for simulated input
#[derive(Debug, Default)]
pub struct QueuedEventSource {
    events: VecDeque<Event>,
}

impl QueuedEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for QueuedEventSource {
    fn poll_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

impl FromIterator<Event> for QueuedEventSource {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
