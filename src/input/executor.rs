//! Where callbacks run
//!
//! Dispatch never calls user code on the thread delivering the event. Every
//! matched callback becomes a [`Job`] handed to an [`Executor`], and dispatch
//! moves on without waiting for it. Two callbacks fired by the same event may
//! run concurrently and in either order; the only guarantee is that both were
//! submitted before dispatch returned. Callbacks that share state must do
//! their own synchronization.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

/// A unit of fire-and-forget work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Accepts jobs for independent execution
pub trait Executor: Send + Sync {
    /// Queue `job` to run later. Must not run it on the calling thread before
    /// returning.
    fn submit(&self, job: Job);
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn submit(&self, job: Job) {
        (**self).submit(job)
    }
}

/// Runs each job on a tokio blocking-pool thread
///
/// Callbacks are plain synchronous closures, so they go to the blocking pool
/// rather than the async workers. A callback that panics is contained by the
/// runtime and does not affect dispatch.
pub struct TokioExecutor {
    handle: Handle,
    // Kept alive for executors that own their runtime
    _runtime: Option<OwnedRuntime>,
}

impl TokioExecutor {
    /// Build an executor with its own runtime and up to `callback_threads`
    /// concurrent callbacks
    pub fn new(callback_threads: usize) -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(callback_threads.max(1))
            .thread_name("input-callback")
            .build()?;

        debug!(callback_threads, "Callback runtime started");

        Ok(Self {
            handle: runtime.handle().clone(),
            _runtime: Some(OwnedRuntime(Some(runtime))),
        })
    }

    /// Submit onto an existing runtime
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            _runtime: None,
        }
    }

    /// The runtime callbacks are submitted to
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Executor for TokioExecutor {
    fn submit(&self, job: Job) {
        // The join handle is dropped: nobody waits on callbacks
        drop(self.handle.spawn_blocking(job));
    }
}

/// Shuts the runtime down without blocking, so the last executor reference
/// may be dropped from any thread, including a callback thread.
struct OwnedRuntime(Option<Runtime>);

impl Drop for OwnedRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

/// Queues jobs until the owner drains them
///
/// Useful for hosts that want callbacks to run at a fixed point in their
/// frame, and for observing submission order.
#[derive(Default)]
pub struct ManualExecutor {
    queue: Mutex<VecDeque<Job>>,
}

impl ManualExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs waiting to run
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Runs queued jobs in submission order until the queue is empty,
    /// including jobs submitted by the jobs themselves. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the lock before running so jobs can submit more
            let next = self.queue.lock().pop_front();
            let Some(job) = next else {
                return ran;
            };
            job();
            ran += 1;
        }
    }

    /// Drops all queued jobs without running them
    pub fn clear(&self) {
        self.queue.lock().clear();
    }
}

impl Executor for ManualExecutor {
    fn submit(&self, job: Job) {
        self.queue.lock().push_back(job);
    }
}
