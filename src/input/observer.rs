//! Broadcast observer lists
//!
//! Lighter than a [`Dispatcher`](super::Dispatcher): no per-event keys and no
//! activation state. Every observer gets every value, submitted in
//! registration order.

use std::sync::Arc;

use super::executor::Executor;
use super::handler::Callback;
use super::partition::{Handle, HandleAllocator};

pub struct ObserverList<T> {
    observers: Vec<(Handle<T>, Callback<T>)>,
    handles: HandleAllocator,
}

impl<T> ObserverList<T>
where
    T: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            handles: HandleAllocator::default(),
        }
    }

    /// Registers an observer and returns its handle
    pub fn subscribe<F>(&mut self, observer: F) -> Handle<T>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let handle = self.handles.next();
        self.observers.push((handle, Arc::new(observer)));
        handle
    }

    /// Removes an observer. Returns false if the handle is unknown.
    pub fn unsubscribe(&mut self, handle: Handle<T>) -> bool {
        let Some(index) = self.observers.iter().position(|(h, _)| *h == handle) else {
            return false;
        };
        self.observers.remove(index);
        true
    }

    /// Submits `value` to every observer
    pub fn notify(&self, value: &T, executor: &dyn Executor) {
        for (_, observer) in &self.observers {
            let observer = Arc::clone(observer);
            let value = value.clone();
            executor.submit(Box::new(move || observer(value)));
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T> Default for ObserverList<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
