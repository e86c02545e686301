//! Render surfaces

use std::thread::{self, ThreadId};

use crate::geometry::{Position, Size};

/// Something that can be presented to
///
/// A surface is driven by at most one thread at a time. Only the render loop
/// calls [`activate`](Self::activate) and [`display`](Self::display).
pub trait RenderSurface: Send + 'static {
    /// Claim (`true`) or release (`false`) the surface for the calling thread
    fn activate(&mut self, active: bool);

    fn is_open(&self) -> bool;

    /// Present one frame
    fn display(&mut self);

    fn close(&mut self);

    fn size(&self) -> Size;

    fn set_size(&mut self, size: Size);

    fn set_title(&mut self, title: &str);

    fn position(&self) -> Position;

    fn set_position(&mut self, position: Position);
}

/// In-memory surface that records what was done to it
#[derive(Debug)]
pub struct HeadlessSurface {
    open: bool,
    owner: Option<ThreadId>,
    /// Number of times any thread claimed the surface while someone else
    /// already held it
    contended: u64,
    presented: u64,
    title: String,
    size: Size,
    position: Position,
}

impl HeadlessSurface {
    pub fn new(size: Size) -> Self {
        Self {
            open: true,
            owner: None,
            contended: 0,
            presented: 0,
            title: String::new(),
            size,
            position: Position::default(),
        }
    }

    /// Thread currently holding the surface active
    pub fn owner(&self) -> Option<ThreadId> {
        self.owner
    }

    pub fn is_active(&self) -> bool {
        self.owner.is_some()
    }

    /// Claims made while another thread held the surface
    pub fn contended(&self) -> u64 {
        self.contended
    }

    /// Frames displayed so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Size::new(800, 600))
    }
}

impl RenderSurface for HeadlessSurface {
    fn activate(&mut self, active: bool) {
        let current = thread::current().id();
        if active {
            if self.owner.is_some_and(|owner| owner != current) {
                self.contended += 1;
            }
            self.owner = Some(current);
        } else if self.owner == Some(current) {
            self.owner = None;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn display(&mut self) {
        if self.open {
            self.presented += 1;
        }
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_activation_tracks_owner() {
        let mut surface = HeadlessSurface::default();
        assert!(!surface.is_active());

        surface.activate(true);
        assert_eq!(surface.owner(), Some(thread::current().id()));

        surface.activate(false);
        assert!(!surface.is_active());
        assert_eq!(surface.contended(), 0);
    }

    #[test]
    fn test_headless_closed_surface_does_not_present() {
        let mut surface = HeadlessSurface::default();
        surface.display();
        surface.close();
        surface.display();

        assert!(!surface.is_open());
        assert_eq!(surface.presented(), 1);
    }
}
