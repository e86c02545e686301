//! Window configuration and the winit-backed render surface

use std::sync::Arc;

use tracing::{debug, trace};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::window::{Window, WindowAttributes};

use super::config::WindowConfig;
use crate::geometry::{Position, Size};
use crate::window::RenderSurface;

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated)
}

/// A winit window driven as a render surface
///
/// Some platforms only allow window calls from the event loop thread, so a
/// present from the render thread just marks a redraw as pending. The event
/// loop picks it up with [`take_redraw`](Self::take_redraw). Closing hides
/// the window; the event loop decides when the process exits.
pub struct WinitSurface {
    window: Arc<Window>,
    open: bool,
    active: bool,
    redraw_pending: bool,
    presented: u64,
}

impl WinitSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            open: true,
            active: false,
            redraw_pending: false,
            presented: 0,
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frames presented by the render loop
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Returns true once per present since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }
}

impl RenderSurface for WinitSurface {
    fn activate(&mut self, active: bool) {
        trace!(active, "Surface activation");
        self.active = active;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn display(&mut self) {
        if self.open {
            self.presented += 1;
            self.redraw_pending = true;
        }
    }

    fn close(&mut self) {
        if self.open {
            debug!("Hiding window");
            self.window.set_visible(false);
            self.open = false;
        }
    }

    fn size(&self) -> Size {
        let size = self.window.inner_size();
        Size::new(size.width, size.height)
    }

    fn set_size(&mut self, size: Size) {
        // None means the platform applies the size later
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(size.width, size.height));
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn position(&self) -> Position {
        self.window
            .outer_position()
            .map(|p| Position::new(p.x, p.y))
            .unwrap_or_default()
    }

    fn set_position(&mut self, position: Position) {
        self.window
            .set_outer_position(PhysicalPosition::new(position.x, position.y));
    }
}
