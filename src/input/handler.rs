//! Event descriptor to callback bindings

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use super::events::{ButtonClick, EventButton, EventKey};
use super::executor::Executor;

/// A shareable callback receiving `A`
pub type Callback<A> = Arc<dyn Fn(A) + Send + Sync + 'static>;

/// Maps event descriptors of type `E` to callbacks receiving `A`
///
/// A handler on its own does nothing. It fires once added to a
/// [`HandlerSet`](super::HandlerSet) that is registered with a
/// [`Dispatcher`](super::Dispatcher), while both are active.
pub struct Handler<E, A> {
    bindings: HashMap<E, Callback<A>>,
}

/// Key chord bindings. Callbacks receive the chord that matched.
pub type KeyboardHandler = Handler<EventKey, EventKey>;

/// Mouse button bindings. Callbacks receive the button and cursor position.
pub type ButtonHandler = Handler<EventButton, ButtonClick>;

impl<E, A> Handler<E, A>
where
    E: Eq + Hash,
    A: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `callback` to `event`, replacing any previous binding
    pub fn bind<F>(&mut self, event: E, callback: F) -> &mut Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        self.bindings.insert(event, Arc::new(callback));
        self
    }

    /// Builder-style [`bind`](Self::bind)
    pub fn with<F>(mut self, event: E, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        self.bind(event, callback);
        self
    }

    /// Removes the binding for `event`. Returns false if there was none.
    pub fn unbind(&mut self, event: &E) -> bool {
        self.bindings.remove(event).is_some()
    }

    pub fn is_bound(&self, event: &E) -> bool {
        self.bindings.contains_key(event)
    }

    /// Number of bound events
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Submits the callback bound to `event`, if any. Returns true on a hit.
    pub(crate) fn check(&self, event: &E, args: &A, executor: &dyn Executor) -> bool {
        let Some(callback) = self.bindings.get(event) else {
            return false;
        };

        let callback = Arc::clone(callback);
        let args = args.clone();
        executor.submit(Box::new(move || callback(args)));
        true
    }
}

impl<E, A> Default for Handler<E, A>
where
    E: Eq + Hash,
    A: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug, A> fmt::Debug for Handler<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::{KeyCode, Modifiers};
    use crate::input::executor::ManualExecutor;
    use parking_lot::Mutex;

    #[test]
    fn test_check_submits_bound_callback() {
        let executor = ManualExecutor::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let key = EventKey::pressed(KeyCode::A).with_modifiers(Modifiers::SHIFT);

        let sink = Arc::clone(&seen);
        let handler = KeyboardHandler::new().with(key, move |k| sink.lock().push(k));

        assert!(handler.check(&key, &key, &executor));
        assert!(seen.lock().is_empty(), "callback must be deferred");

        executor.run_pending();
        assert_eq!(*seen.lock(), vec![key]);
    }

    #[test]
    fn test_check_miss() {
        let executor = ManualExecutor::new();
        let handler = KeyboardHandler::new().with(EventKey::pressed(KeyCode::A), |_| {});

        let release = EventKey::released(KeyCode::A);
        assert!(!handler.check(&release, &release, &executor));
        assert_eq!(executor.pending(), 0);
    }

    #[test]
    fn test_unbind() {
        let key = EventKey::pressed(KeyCode::Space);
        let mut handler = KeyboardHandler::new();
        handler.bind(key, |_| {});

        assert!(handler.is_bound(&key));
        assert!(handler.unbind(&key));
        assert!(!handler.unbind(&key));
        assert!(handler.is_empty());
    }
}
