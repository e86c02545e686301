//! Render thread and its request/acknowledge handshake
//!
//! The render loop runs on its own thread and is the only code that marks
//! the surface active or presents to it. Other threads change its state by
//! sending a [`RenderRequest`] and blocking on the attached one-shot
//! acknowledgement, which the loop sends only after the transition is done
//! (surface claimed or released, state published).
//!
//! ```text
//!           start()             stop()
//! Stopped ─────────→ Running ─────────→ Stopped
//!                     │   ↑
//!        deactivate() │   │ activate()
//!                     ↓   │
//!                     Paused ──stop()──→ Stopped
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::thread;

use parking_lot::{Mutex, RwLock};
use serde::Deserialize;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::message::WindowMessage;
use super::surface::RenderSurface;
use crate::input::{Executor, ObserverList};

/// Lifecycle state of a render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RenderState {
    /// No render thread. Only `start` leaves this state.
    Stopped = 0,
    /// Render thread alive, surface released, waiting for requests
    Paused = 1,
    /// Render thread holds the surface and presents granted frames
    Running = 2,
}

impl RenderState {
    fn from_u8(value: u8) -> Self {
        match value {
            2 => Self::Running,
            1 => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Running => "running",
        };
        f.write_str(name)
    }
}

/// Render loop tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Frames that may be granted ahead of the render loop
    pub frame_queue_depth: usize,
    /// Publish [`WindowMessage::Spinning`] when the loop runs out of frames
    pub notify_spinning: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            frame_queue_depth: 1,
            notify_spinning: true,
        }
    }
}

/// Asks the render loop to enter `target`, acknowledged with the state the
/// loop ended up in
pub(crate) struct RenderRequest {
    pub target: RenderState,
    pub ack: oneshot::Sender<RenderState>,
}

/// State shared between a window and its render thread
pub(crate) struct RenderShared {
    state: AtomicU8,
    frames_presented: AtomicU64,
    spin_count: AtomicU64,
    spinning: AtomicBool,
    observers: RwLock<ObserverList<WindowMessage>>,
    executor: Arc<dyn Executor>,
}

impl RenderShared {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            state: AtomicU8::new(RenderState::Stopped as u8),
            frames_presented: AtomicU64::new(0),
            spin_count: AtomicU64::new(0),
            spinning: AtomicBool::new(false),
            observers: RwLock::new(ObserverList::new()),
            executor,
        }
    }

    pub fn state(&self) -> RenderState {
        RenderState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented.load(Ordering::SeqCst)
    }

    pub fn spin_count(&self) -> u64 {
        self.spin_count.load(Ordering::SeqCst)
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning.load(Ordering::SeqCst)
    }

    pub fn observers(&self) -> &RwLock<ObserverList<WindowMessage>> {
        &self.observers
    }

    /// Hands `message` to every window observer
    pub fn publish(&self, message: WindowMessage) {
        self.observers.read().notify(&message, &*self.executor);
    }
}

/// The render-owning side of the handshake
pub(crate) struct RenderLoop<S> {
    surface: Arc<Mutex<S>>,
    shared: Arc<RenderShared>,
    requests: mpsc::UnboundedReceiver<RenderRequest>,
    frames: mpsc::Receiver<()>,
    notify_spinning: bool,
    state: RenderState,
}

impl<S: RenderSurface> RenderLoop<S> {
    pub fn new(
        surface: Arc<Mutex<S>>,
        shared: Arc<RenderShared>,
        requests: mpsc::UnboundedReceiver<RenderRequest>,
        frames: mpsc::Receiver<()>,
        notify_spinning: bool,
    ) -> Self {
        Self {
            surface,
            shared,
            requests,
            frames,
            notify_spinning,
            state: RenderState::Stopped,
        }
    }

    /// Thread body. Claims the surface, reports through `ready`, then serves
    /// requests and frames until stopped.
    pub fn run(mut self, ready: oneshot::Sender<RenderState>) {
        self.enter(RenderState::Running);
        // The starter may have given up waiting; keep running regardless
        let _ = ready.send(self.state);

        while self.state != RenderState::Stopped {
            match self.state {
                RenderState::Running => match self.requests.try_recv() {
                    Ok(request) => self.handle(request),
                    Err(TryRecvError::Empty) => self.step(),
                    Err(TryRecvError::Disconnected) => self.enter(RenderState::Stopped),
                },
                RenderState::Paused => match self.requests.blocking_recv() {
                    Some(request) => self.handle(request),
                    None => self.enter(RenderState::Stopped),
                },
                RenderState::Stopped => {}
            }
        }

        debug!("Render loop exited");
    }

    fn handle(&mut self, request: RenderRequest) {
        if request.target != self.state {
            self.enter(request.target);
        }
        let _ = request.ack.send(self.state);
    }

    /// One iteration while running: present a granted frame, or note the
    /// stall and yield
    fn step(&mut self) {
        if !self.surface.lock().is_open() {
            info!("Surface closed, stopping render loop");
            self.enter(RenderState::Stopped);
            return;
        }

        match self.frames.try_recv() {
            Ok(()) => {
                self.surface.lock().display();
                // Stall ends before the frame becomes visible in the counter
                self.shared.spinning.store(false, Ordering::SeqCst);
                self.shared.frames_presented.fetch_add(1, Ordering::SeqCst);
            }
            Err(_) => {
                self.shared.spin_count.fetch_add(1, Ordering::SeqCst);
                if !self.shared.spinning.swap(true, Ordering::SeqCst) {
                    debug!(
                        frames = self.shared.frames_presented(),
                        "Render loop spinning without a frame"
                    );
                    if self.notify_spinning {
                        self.shared.publish(WindowMessage::Spinning);
                    }
                }
                thread::yield_now();
            }
        }
    }

    /// Claims or releases the surface for `next`, then records and publishes it
    fn enter(&mut self, next: RenderState) {
        self.surface
            .lock()
            .activate(next == RenderState::Running);

        self.state = next;
        self.shared.state.store(next as u8, Ordering::Release);
        self.shared.spinning.store(false, Ordering::SeqCst);

        debug!(state = %next, "Render state changed");
        self.shared.publish(WindowMessage::for_state(next));
    }
}
