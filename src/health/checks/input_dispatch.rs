//! Input dispatch health check

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::Position;
use crate::health::check::{CheckResult, SystemCheck};
use crate::input::{
    ButtonHandler, ButtonSet, EventButton, EventKey, InputSystem, KeyCode, KeyboardHandler,
    KeyboardSet, ManualExecutor, Modifiers, MouseButton,
};

/// Runs a scripted round of events through a fresh input system
#[derive(Debug, Default)]
pub struct InputDispatchCheck;

impl InputDispatchCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for InputDispatchCheck {
    fn name(&self) -> &'static str {
        "Input Dispatch"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Chord, modifier-only and button dispatch with set toggling")
    }

    fn check(&self) -> CheckResult {
        let executor = Arc::new(ManualExecutor::new());
        let input = InputSystem::new(executor.clone());
        let fired = Arc::new(Mutex::new(Vec::new()));

        let chord = EventKey::pressed(KeyCode::A).with_modifiers(Modifiers::SHIFT);
        let sink = Arc::clone(&fired);
        let exact = KeyboardHandler::new().with(chord, move |_| sink.lock().push("exact"));
        let sink = Arc::clone(&fired);
        let any_key = KeyboardHandler::new().with(chord.modifier_only(), move |_| {
            sink.lock().push("modifier")
        });
        let keys = input
            .keyboard()
            .add(KeyboardSet::new().with(exact).with(any_key));

        let sink = Arc::clone(&fired);
        input.buttons().add(ButtonSet::new().with(ButtonHandler::new().with(
            EventButton::pressed(MouseButton::Left),
            move |_| sink.lock().push("button"),
        )));

        let mut details = Vec::new();
        let mut ok = true;
        let mut expect = |step: &str, expected: &[&str]| {
            executor.run_pending();
            let got = std::mem::take(&mut *fired.lock());
            if got == expected {
                details.push(format!("✓ {step}: {got:?}"));
            } else {
                details.push(format!("✗ {step}: expected {expected:?}, got {got:?}"));
                ok = false;
            }
        };

        input.key_pressed(KeyCode::A, Modifiers::SHIFT);
        expect("Shift+A", &["exact", "modifier"]);

        input.key_pressed(KeyCode::B, Modifiers::SHIFT);
        expect("Shift+B", &["modifier"]);

        input.button_pressed(MouseButton::Left, Position::new(1, 1));
        expect("Left click", &["button"]);

        input.keyboard().set_active(keys, false);
        input.key_pressed(KeyCode::A, Modifiers::SHIFT);
        expect("Shift+A with set disabled", &[]);

        input.keyboard().set_active(keys, true);
        input.key_pressed(KeyCode::A, Modifiers::SHIFT);
        expect("Shift+A with set enabled", &["exact", "modifier"]);

        if ok {
            CheckResult::pass("Dispatch round matched").with_details(details)
        } else {
            CheckResult::fail("Unexpected dispatch result").with_details(details)
        }
    }
}
