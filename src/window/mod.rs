//! Window layer
//!
//! A [`GameWindow`] owns a [`RenderSurface`] through a dedicated render
//! thread and exposes a blocking start/activate/deactivate/stop state
//! machine. It also drains an [`EventSource`], forwarding input to its
//! [`InputSystem`](crate::input::InputSystem) and re-publishing every event
//! as a [`WindowMessage`].

mod game_window;
mod message;
mod render;
mod source;
mod surface;

pub use game_window::GameWindow;
pub use message::WindowMessage;
pub use render::{RenderOptions, RenderState};
pub use source::{Event, EventSource, QueuedEventSource};
pub use surface::{HeadlessSurface, RenderSurface};
