//! Render loop health check

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::health::check::{CheckResult, SystemCheck};
use crate::input::{InputSystem, ManualExecutor};
use crate::window::{GameWindow, HeadlessSurface, RenderOptions, RenderState};

/// Drives a headless window through start, pause, resume and stop
#[derive(Debug)]
pub struct RenderLoopCheck {
    frame_timeout: Duration,
}

impl RenderLoopCheck {
    pub fn new() -> Self {
        Self {
            frame_timeout: Duration::from_secs(2),
        }
    }
}

impl Default for RenderLoopCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for RenderLoopCheck {
    fn name(&self) -> &'static str {
        "Render Loop"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Render thread handshake and surface ownership")
    }

    fn check(&self) -> CheckResult {
        let input = Arc::new(InputSystem::new(Arc::new(ManualExecutor::new())));
        let window = GameWindow::new(HeadlessSurface::default(), input, RenderOptions::default());

        let mut details = Vec::new();
        let mut ok = record(&mut details, "start", window.start(), RenderState::Running);

        let render_thread = window.surface().owner();
        if render_thread.is_none() || render_thread == Some(thread::current().id()) {
            details.push("✗ surface not held by the render thread".to_string());
            ok = false;
        }

        let deadline = Instant::now() + self.frame_timeout;
        while window.frames_presented() == 0 && Instant::now() < deadline {
            window.next_frame();
            thread::yield_now();
        }
        let presented = window.frames_presented();

        ok &= record(&mut details, "deactivate", window.deactivate(), RenderState::Paused);
        ok &= record(&mut details, "activate", window.activate(), RenderState::Running);
        ok &= record(&mut details, "stop", window.stop(), RenderState::Stopped);
        ok &= record(
            &mut details,
            "activate after stop",
            window.activate(),
            RenderState::Stopped,
        );

        if window.surface().is_active() {
            details.push("✗ surface still active after stop".to_string());
            ok = false;
        }

        if !ok {
            return CheckResult::fail("Render handshake misbehaved").with_details(details);
        }
        if presented == 0 {
            return CheckResult::warn("Handshake ok, no frame presented in time")
                .with_details(details);
        }
        CheckResult::pass(format!("Handshake ok, {presented} frame(s) presented"))
            .with_details(details)
    }
}

fn record(details: &mut Vec<String>, label: &str, got: RenderState, expected: RenderState) -> bool {
    if got == expected {
        details.push(format!("✓ {label}: {got}"));
        true
    } else {
        details.push(format!("✗ {label}: expected {expected}, got {got}"));
        false
    }
}
