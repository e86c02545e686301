//! Game window: render state machine plus event re-publishing

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, trace, warn};

use super::message::WindowMessage;
use super::render::{RenderLoop, RenderOptions, RenderRequest, RenderShared, RenderState};
use super::source::{Event, EventSource};
use super::surface::RenderSurface;
use crate::geometry::{Position, Size};
use crate::input::{ButtonClick, EventButton, EventKey, Handle, InputSystem};

/// Caller-side ends of a live render thread
struct RenderControl {
    requests: mpsc::UnboundedSender<RenderRequest>,
    frames: mpsc::Sender<()>,
    thread: JoinHandle<()>,
}

/// A surface driven by its own render thread
///
/// [`start`](Self::start), [`activate`](Self::activate),
/// [`deactivate`](Self::deactivate) and [`stop`](Self::stop) block until the
/// render thread has acknowledged the transition, so the state they return
/// is the state the thread is in. Calls from several threads are applied one
/// at a time. Requests made while stopped are ignored.
///
/// Events polled through [`poll_events`](Self::poll_events) are forwarded to
/// the window's [`InputSystem`] and re-published to window observers.
pub struct GameWindow<S: RenderSurface> {
    surface: Arc<Mutex<S>>,
    shared: Arc<RenderShared>,
    // Held for the whole of a handshake
    control: Mutex<Option<RenderControl>>,
    input: Arc<InputSystem>,
    options: RenderOptions,
}

impl<S: RenderSurface> GameWindow<S> {
    /// Wraps `surface`. Window messages go through the input system's executor.
    pub fn new(surface: S, input: Arc<InputSystem>, options: RenderOptions) -> Self {
        let executor = Arc::clone(input.executor());
        Self {
            surface: Arc::new(Mutex::new(surface)),
            shared: Arc::new(RenderShared::new(executor)),
            control: Mutex::new(None),
            input,
            options,
        }
    }

    /// Spawns the render thread and waits until it holds the surface
    ///
    /// No-op unless stopped. A closed surface is never started.
    pub fn start(&self) -> RenderState {
        let mut control = self.control.lock();
        Self::reap(&mut control);

        if control.is_some() {
            trace!("Start ignored, render thread already running");
            return self.state();
        }
        if !self.surface.lock().is_open() {
            info!("Start ignored, surface is closed");
            return RenderState::Stopped;
        }

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (frame_tx, frame_rx) = mpsc::channel(self.options.frame_queue_depth.max(1));
        let (ready_tx, ready_rx) = oneshot::channel();

        let render_loop = RenderLoop::new(
            Arc::clone(&self.surface),
            Arc::clone(&self.shared),
            request_rx,
            frame_rx,
            self.options.notify_spinning,
        );

        let spawned = thread::Builder::new()
            .name("render".to_string())
            .spawn(move || render_loop.run(ready_tx));
        let thread = match spawned {
            Ok(thread) => thread,
            Err(e) => {
                error!(error = %e, "Failed to spawn render thread");
                return RenderState::Stopped;
            }
        };

        match ready_rx.blocking_recv() {
            Ok(state) => {
                info!(%state, "Render thread started");
                *control = Some(RenderControl {
                    requests: request_tx,
                    frames: frame_tx,
                    thread,
                });
                state
            }
            Err(_) => {
                error!("Render thread exited before taking the surface");
                Self::join(thread);
                RenderState::Stopped
            }
        }
    }

    /// Resumes presenting. No-op when stopped.
    pub fn activate(&self) -> RenderState {
        self.request(RenderState::Running)
    }

    /// Releases the surface and waits. No-op when stopped.
    pub fn deactivate(&self) -> RenderState {
        self.request(RenderState::Paused)
    }

    /// Releases the surface and ends the render thread. Returns once the
    /// thread has exited.
    pub fn stop(&self) -> RenderState {
        self.request(RenderState::Stopped)
    }

    fn request(&self, target: RenderState) -> RenderState {
        let mut control = self.control.lock();
        Self::reap(&mut control);

        let Some(live) = control.as_ref() else {
            trace!(%target, "Request ignored, window is stopped");
            return RenderState::Stopped;
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        if live
            .requests
            .send(RenderRequest {
                target,
                ack: ack_tx,
            })
            .is_err()
        {
            debug!(%target, "Render thread gone before request");
        }

        // A dropped acknowledgement means the loop exited on its own
        let state = ack_rx.blocking_recv().unwrap_or(RenderState::Stopped);
        debug!(%target, %state, "Render request acknowledged");

        if state == RenderState::Stopped
            && let Some(finished) = control.take()
        {
            Self::join(finished.thread);
        }
        state
    }

    /// Joins a render thread that stopped on its own
    fn reap(control: &mut Option<RenderControl>) {
        if control
            .as_ref()
            .is_some_and(|live| live.thread.is_finished())
            && let Some(finished) = control.take()
        {
            debug!("Reaping finished render thread");
            Self::join(finished.thread);
        }
    }

    fn join(thread: JoinHandle<()>) {
        if thread.join().is_err() {
            error!("Render thread panicked");
        }
    }

    /// Grants the render loop one frame. Never blocks: returns false when the
    /// window is not running, a transition is in flight, or the frame queue
    /// is full.
    pub fn next_frame(&self) -> bool {
        if self.state() != RenderState::Running {
            return false;
        }
        let Some(control) = self.control.try_lock() else {
            return false;
        };
        control
            .as_ref()
            .is_some_and(|live| live.frames.try_send(()).is_ok())
    }

    /// Stops rendering, closes the surface and publishes
    /// [`WindowMessage::Closed`]
    pub fn close_window(&self) {
        self.stop();
        self.surface.lock().close();
        info!("Window closed");
        self.shared.publish(WindowMessage::Closed);
    }

    /// Drains `source`, handling each event. Returns how many were handled.
    pub fn poll_events(&self, source: &mut impl EventSource) -> usize {
        let mut handled = 0;
        while let Some(event) = source.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Forwards input events to the input system and publishes a message for
    /// every event
    pub fn handle_event(&self, event: Event) {
        let message = match event {
            Event::Closed => {
                self.close_window();
                return;
            }
            Event::Resized(size) => WindowMessage::Resized(size),
            Event::LostFocus => WindowMessage::LostFocus,
            Event::GainedFocus => WindowMessage::GainedFocus,
            Event::KeyPressed { code, modifiers } => {
                self.input.key_pressed(code, modifiers);
                WindowMessage::KeyPressed(EventKey::new(code, modifiers, true))
            }
            Event::KeyReleased { code, modifiers } => {
                self.input.key_released(code, modifiers);
                WindowMessage::KeyReleased(EventKey::new(code, modifiers, false))
            }
            Event::TextEntered(character) => {
                self.input.text_entered(character);
                WindowMessage::TextEntered(character)
            }
            Event::MouseButtonPressed { button, position } => {
                self.input.button_pressed(button, position);
                WindowMessage::MouseButtonPressed(ButtonClick {
                    event: EventButton::pressed(button),
                    position,
                })
            }
            Event::MouseButtonReleased { button, position } => {
                self.input.button_released(button, position);
                WindowMessage::MouseButtonReleased(ButtonClick {
                    event: EventButton::released(button),
                    position,
                })
            }
            Event::MouseMoved(position) => {
                self.input.mouse_moved(position);
                WindowMessage::MouseMoved(position)
            }
            Event::MouseWheelMoved { delta, position } => {
                self.input.wheel_moved(delta, position);
                WindowMessage::MouseWheelMoved { delta, position }
            }
            Event::MouseEntered => WindowMessage::MouseEntered,
            Event::MouseLeft => WindowMessage::MouseLeft,
        };
        self.shared.publish(message);
    }

    /// Registers a window observer
    pub fn subscribe<F>(&self, observer: F) -> Handle<WindowMessage>
    where
        F: Fn(WindowMessage) + Send + Sync + 'static,
    {
        self.shared.observers().write().subscribe(observer)
    }

    pub fn unsubscribe(&self, handle: Handle<WindowMessage>) -> bool {
        self.shared.observers().write().unsubscribe(handle)
    }

    pub fn input(&self) -> &Arc<InputSystem> {
        &self.input
    }

    pub fn state(&self) -> RenderState {
        self.shared.state()
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == RenderState::Stopped
    }

    pub fn frames_presented(&self) -> u64 {
        self.shared.frames_presented()
    }

    /// Loop iterations that found no frame to present
    pub fn spin_count(&self) -> u64 {
        self.shared.spin_count()
    }

    /// True while the render loop is running without frames
    pub fn is_spinning(&self) -> bool {
        self.shared.is_spinning()
    }

    /// Locks the surface. Holding the guard stalls the render loop.
    pub fn surface(&self) -> MutexGuard<'_, S> {
        self.surface.lock()
    }

    pub fn is_open(&self) -> bool {
        self.surface.lock().is_open()
    }

    pub fn size(&self) -> Size {
        self.surface.lock().size()
    }

    pub fn set_size(&self, size: Size) {
        self.surface.lock().set_size(size);
    }

    pub fn set_title(&self, title: &str) {
        self.surface.lock().set_title(title);
    }

    pub fn position(&self) -> Position {
        self.surface.lock().position()
    }

    pub fn set_position(&self, position: Position) {
        self.surface.lock().set_position(position);
    }
}

impl<S: RenderSurface> Drop for GameWindow<S> {
    fn drop(&mut self) {
        if self.control.get_mut().is_some() {
            warn!("Game window dropped while rendering, stopping");
            self.stop();
        }
    }
}
