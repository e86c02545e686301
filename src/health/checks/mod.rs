//! Built-in health checks

pub mod build_info;
pub mod config;
pub mod input_dispatch;
pub mod render_loop;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use input_dispatch::InputDispatchCheck;
pub use render_loop::RenderLoopCheck;
