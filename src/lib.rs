//! Gold engine core
//!
//! Input dispatch through switchable handler sets, and a game window whose
//! surface is owned by a dedicated render thread.

/// Integer positions and sizes
pub mod geometry;

/// Handlers, handler sets, dispatchers and the input system
pub mod input;

/// Render state machine, surfaces and event sources
pub mod window;

/// winit application shell
pub mod app;

/// Build-time information (version, rustc, target, timestamp)
pub mod build_info;

/// Startup self-checks
pub mod health;
