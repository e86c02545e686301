//! Input dispatch
//!
//! Routes decoded input events to user callbacks through switchable groups
//! of bindings.
//!
//! # Architecture
//!
//! ```text
//! Event source → InputSystem ─┬→ Dispatcher (keyboard) → HandlerSet → Handler → Executor
//!                             ├→ Dispatcher (buttons)  → HandlerSet → Handler → Executor
//!                             └→ ObserverList (move / wheel / text)          → Executor
//! ```
//!
//! Dispatchers and handler sets keep their entries split into an active
//! prefix and an inactive suffix ([`ActiveSet`]), so toggling is a swap and
//! dispatch only walks active entries. Entries are addressed by [`Handle`]s,
//! never by position. A handle is typed by what it addresses
//! ([`SetHandle`], [`HandlerHandle`]), so one container's handles cannot be
//! passed to another.
//!
//! Key events are dispatched twice: once for the exact chord, then once for
//! its modifier-only twin ([`KeyCode::Modifier`]), so a binding on
//! `Control + Modifier` sees every key pressed with Control held.
//!
//! # Usage
//!
//! ```ignore
//! let executor = Arc::new(TokioExecutor::new(4)?);
//! let input = InputSystem::new(executor);
//!
//! let menu = input.keyboard().add(
//!     KeyboardSet::new().with(
//!         KeyboardHandler::new().with(EventKey::pressed(KeyCode::Escape), |_| close_menu()),
//!     ),
//! );
//!
//! // Later, when the menu is hidden
//! input.keyboard().set_active(menu, false);
//! ```

mod dispatcher;
mod events;
mod executor;
mod handler;
mod observer;
mod partition;
mod set;
mod system;

pub use dispatcher::{ButtonDispatcher, Dispatcher, KeyboardDispatcher, SetHandle};
pub use events::{
    ButtonClick, EventButton, EventKey, KeyCode, Modifiers, MouseButton, MouseMoved, TextEntered,
    WheelMoved,
};
pub use executor::{Executor, Job, ManualExecutor, TokioExecutor};
pub use handler::{ButtonHandler, Callback, Handler, KeyboardHandler};
pub use observer::ObserverList;
pub use partition::{ActiveSet, Handle};
pub use set::{ButtonSet, HandlerHandle, HandlerSet, KeyboardSet};
pub use system::InputSystem;
