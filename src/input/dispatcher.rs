//! Set-of-sets registry
//!
//! A [`Dispatcher`] holds [`HandlerSet`]s with the same active/inactive
//! partitioning a set applies to its handlers. Disabling a set silences all
//! of its handlers at once, and re-enabling it restores whatever per-handler
//! state the set had, since the set itself is untouched while disabled.

use std::hash::Hash;

use tracing::{debug, trace};

use super::events::{ButtonClick, EventButton, EventKey};
use super::executor::Executor;
use super::partition::{ActiveSet, Handle};
use super::set::HandlerSet;

/// Registry of handler sets for one kind of event
pub struct Dispatcher<E, A> {
    sets: ActiveSet<HandlerSet<E, A>>,
}

pub type KeyboardDispatcher = Dispatcher<EventKey, EventKey>;
pub type ButtonDispatcher = Dispatcher<EventButton, ButtonClick>;

/// Addresses a handler set registered with a [`Dispatcher`]
pub type SetHandle<E, A> = Handle<HandlerSet<E, A>>;

impl<E, A> Dispatcher<E, A>
where
    E: Eq + Hash,
    A: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            sets: ActiveSet::new(),
        }
    }

    /// Registers a set, enabled, and returns its handle
    pub fn add(&mut self, set: HandlerSet<E, A>) -> SetHandle<E, A> {
        let handle = self.sets.insert(set);
        debug!(set = %handle, "Handler set registered");
        handle
    }

    /// Unregisters a set. Unknown handles are ignored.
    pub fn remove(&mut self, handle: SetHandle<E, A>) -> Option<HandlerSet<E, A>> {
        let removed = self.sets.remove(handle);
        if removed.is_some() {
            debug!(set = %handle, "Handler set removed");
        }
        removed
    }

    /// Enables or disables a whole set
    pub fn set_active(&mut self, handle: SetHandle<E, A>, active: bool) {
        if self.sets.set_active(handle, active) {
            debug!(set = %handle, active, "Handler set toggled");
        }
    }

    pub fn is_active(&self, handle: SetHandle<E, A>) -> bool {
        self.sets.is_active(handle)
    }

    /// Access a registered set to add, remove or toggle its handlers
    pub fn set_mut(&mut self, handle: SetHandle<E, A>) -> Option<&mut HandlerSet<E, A>> {
        self.sets.get_mut(handle)
    }

    pub fn set(&self, handle: SetHandle<E, A>) -> Option<&HandlerSet<E, A>> {
        self.sets.get(handle)
    }

    /// Handles in storage order, enabled ones first
    pub fn handles(&self) -> Vec<SetHandle<E, A>> {
        self.sets.handles()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn active_len(&self) -> usize {
        self.sets.active_len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Fans `event` out to every enabled set. Returns the number of callbacks
    /// submitted.
    pub fn dispatch(&self, event: &E, args: &A, executor: &dyn Executor) -> usize {
        let hits = self
            .sets
            .active()
            .map(|set| set.dispatch(event, args, executor))
            .sum();
        trace!(hits, sets = self.sets.active_len(), "Dispatched");
        hits
    }
}

impl<E, A> Default for Dispatcher<E, A>
where
    E: Eq + Hash,
    A: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
