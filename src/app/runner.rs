//! Main application handler

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use config::ConfigError;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::error::{EventLoopError, OsError};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use super::collector::WinitEventSource;
use super::config::AppConfig;
use super::window::{WinitSurface, window_attributes_from_config};
use crate::input::{
    EventKey, InputSystem, KeyCode, KeyboardHandler, KeyboardSet, Modifiers, TokioExecutor,
};
use crate::window::{GameWindow, RenderState};

/// Errors that end the application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] OsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
    #[error("failed to start callback executor: {0}")]
    Executor(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Main application
///
/// Owns the winit window through a [`GameWindow`]. Escape closes the window,
/// losing focus pauses rendering and regaining it resumes.
pub struct App {
    config: AppConfig,
    executor: Arc<TokioExecutor>,
    events: WinitEventSource,
    window: Option<GameWindow<WinitSurface>>,
    exit_requested: Arc<AtomicBool>,
    error: Option<AppError>,
}

impl App {
    /// Creates the application and its callback executor
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        info!(profile = %config.profile, "Starting game");
        info!(?config.window, ?config.render, "Window configuration");

        let executor = Arc::new(TokioExecutor::new(config.input.callback_threads)?);

        Ok(Self {
            config,
            executor,
            events: WinitEventSource::new(),
            window: None,
            exit_requested: Arc::new(AtomicBool::new(false)),
            error: None,
        })
    }

    /// The game window, once the event loop has resumed
    pub fn window(&self) -> Option<&GameWindow<WinitSurface>> {
        self.window.as_ref()
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = window_attributes_from_config(&self.config.window);
        let window = Arc::new(event_loop.create_window(attributes)?);
        // IME text arrives as Ime::Commit only while IME is allowed
        window.set_ime_allowed(true);

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );

        let input = Arc::new(InputSystem::new(self.executor.clone()));
        self.bind_defaults(&input);

        let game_window = GameWindow::new(WinitSurface::new(window), input, self.config.render);
        game_window.subscribe(|message| debug!(%message, "Window message"));
        game_window.start();

        self.window = Some(game_window);
        Ok(())
    }

    /// Escape requests exit; holding Control logs every chord
    fn bind_defaults(&self, input: &InputSystem) {
        let exit = Arc::clone(&self.exit_requested);
        let controls = KeyboardSet::new()
            .with(
                KeyboardHandler::new().with(EventKey::pressed(KeyCode::Escape), move |_| {
                    info!("Escape pressed, exiting");
                    exit.store(true, Ordering::Release);
                }),
            )
            .with(KeyboardHandler::new().with(
                EventKey::pressed(KeyCode::Modifier).with_modifiers(Modifiers::CONTROL),
                |key| debug!(%key, "Control chord"),
            ));

        input.keyboard().add(controls);
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.take() {
            window.close_window();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            error!(error = %e, "Failed to create window");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested.load(Ordering::Acquire) {
            self.exit(event_loop);
            return;
        }

        let Some(window) = &self.window else {
            return;
        };

        if window.state() == RenderState::Running {
            window.next_frame();
        }

        let mut surface = window.surface();
        if surface.take_redraw() {
            surface.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.events.handle_window_event(&event);

        let Some(window) = &self.window else {
            return;
        };
        window.poll_events(&mut self.events);

        match event {
            // Already closed while polling
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                window.deactivate();
            }
            WindowEvent::Focused(true) => {
                window.activate();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.take()
            && !window.is_stopped()
        {
            warn!("Event loop exiting with the render thread alive");
            window.stop();
        }
    }
}

/// Runs the game until the window closes
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop
        .run_app(&mut app)
        .map_err(AppError::EventLoopRun)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
