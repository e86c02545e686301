//! Game application module
//!
//! Drives a [`GameWindow`](crate::window::GameWindow) from a winit event loop.

mod collector;
pub mod config;
mod runner;
mod window;

pub use collector::WinitEventSource;
pub use config::{AppConfig, InputConfig, WindowConfig};
pub use runner::{App, AppError, run};
pub use window::{WinitSurface, window_attributes_from_config};
