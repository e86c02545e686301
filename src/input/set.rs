//! Handler sets
//!
//! A [`HandlerSet`] groups handlers that are switched on and off together,
//! e.g. "menu controls" or "in-game controls". Individual handlers inside a
//! set can also be toggled without removing them.

use std::hash::Hash;

use tracing::trace;

use super::events::{ButtonClick, EventButton, EventKey};
use super::executor::Executor;
use super::handler::Handler;
use super::partition::{ActiveSet, Handle};

/// Ordered handlers split into active and inactive partitions
pub struct HandlerSet<E, A> {
    handlers: ActiveSet<Handler<E, A>>,
}

pub type KeyboardSet = HandlerSet<EventKey, EventKey>;
pub type ButtonSet = HandlerSet<EventButton, ButtonClick>;

/// Addresses a handler inside a [`HandlerSet`]
pub type HandlerHandle<E, A> = Handle<Handler<E, A>>;

impl<E, A> HandlerSet<E, A>
where
    E: Eq + Hash,
    A: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            handlers: ActiveSet::new(),
        }
    }

    /// Adds a handler, active, and returns its handle
    pub fn add(&mut self, handler: Handler<E, A>) -> HandlerHandle<E, A> {
        self.handlers.insert(handler)
    }

    /// Builder-style [`add`](Self::add) for sets assembled up front
    pub fn with(mut self, handler: Handler<E, A>) -> Self {
        self.add(handler);
        self
    }

    /// Removes a handler. Unknown handles are ignored.
    pub fn remove(&mut self, handle: HandlerHandle<E, A>) -> Option<Handler<E, A>> {
        self.handlers.remove(handle)
    }

    /// Enables or disables a handler without removing it
    pub fn set_active(&mut self, handle: HandlerHandle<E, A>, active: bool) {
        self.handlers.set_active(handle, active);
    }

    pub fn is_active(&self, handle: HandlerHandle<E, A>) -> bool {
        self.handlers.is_active(handle)
    }

    /// Access a handler to change its bindings
    pub fn handler_mut(&mut self, handle: HandlerHandle<E, A>) -> Option<&mut Handler<E, A>> {
        self.handlers.get_mut(handle)
    }

    pub fn handler(&self, handle: HandlerHandle<E, A>) -> Option<&Handler<E, A>> {
        self.handlers.get(handle)
    }

    /// Handles in storage order, active ones first
    pub fn handles(&self) -> Vec<HandlerHandle<E, A>> {
        self.handlers.handles()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn active_len(&self) -> usize {
        self.handlers.active_len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Submits the matching callback of every active handler. Returns the
    /// number of callbacks submitted.
    pub(crate) fn dispatch(&self, event: &E, args: &A, executor: &dyn Executor) -> usize {
        let hits = self
            .handlers
            .active()
            .filter(|handler| handler.check(event, args, executor))
            .count();
        trace!(hits, active = self.handlers.active_len(), "Handler set dispatched");
        hits
    }
}

impl<E, A> Default for HandlerSet<E, A>
where
    E: Eq + Hash,
    A: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::KeyCode;
    use crate::input::executor::ManualExecutor;
    use crate::input::handler::KeyboardHandler;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording_handler(
        key: EventKey,
        name: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> KeyboardHandler {
        let log = Arc::clone(log);
        KeyboardHandler::new().with(key, move |_| log.lock().push(name))
    }

    #[test]
    fn test_dispatch_skips_inactive_handlers() {
        let executor = ManualExecutor::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let e1 = EventKey::pressed(KeyCode::A);
        let e2 = EventKey::pressed(KeyCode::B);

        let mut set = KeyboardSet::new();
        let _h1 = set.add(recording_handler(e1, "h1", &log));
        let h2 = set.add(recording_handler(e1, "h2", &log));
        let _h3 = set.add(recording_handler(e2, "h3", &log));

        set.set_active(h2, false);
        assert_eq!(set.dispatch(&e1, &e1, &executor), 1);
        executor.run_pending();
        assert_eq!(*log.lock(), vec!["h1"]);

        log.lock().clear();
        set.set_active(h2, true);
        assert_eq!(set.dispatch(&e1, &e1, &executor), 2);
        executor.run_pending();
        let mut fired = log.lock().clone();
        fired.sort_unstable();
        assert_eq!(fired, vec!["h1", "h2"]);
    }

    #[test]
    fn test_handler_mut_rebinds() {
        let executor = ManualExecutor::new();
        let key = EventKey::pressed(KeyCode::Enter);
        let mut set = KeyboardSet::new();
        let handle = set.add(KeyboardHandler::new());

        assert_eq!(set.dispatch(&key, &key, &executor), 0);

        set.handler_mut(handle)
            .expect("handler exists")
            .bind(key, |_| {});
        assert_eq!(set.dispatch(&key, &key, &executor), 1);
    }

    #[test]
    fn test_removed_handler_no_longer_fires() {
        let executor = ManualExecutor::new();
        let key = EventKey::pressed(KeyCode::Tab);
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut set = KeyboardSet::new();
        let handle = set.add(recording_handler(key, "tab", &log));

        assert!(set.remove(handle).is_some());
        assert!(set.remove(handle).is_none());
        assert_eq!(set.dispatch(&key, &key, &executor), 0);
        assert!(set.is_empty());
    }
}
