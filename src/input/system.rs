//! Input system façade

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

use super::dispatcher::{ButtonDispatcher, KeyboardDispatcher};
use super::events::{
    ButtonClick, EventButton, EventKey, KeyCode, Modifiers, MouseButton, MouseMoved, TextEntered,
    WheelMoved,
};
use super::executor::Executor;
use super::observer::ObserverList;
use super::partition::Handle;
use crate::geometry::Position;

/// Entry point for decoded input events
///
/// Owns one dispatcher per bindable event kind and one observer list per
/// broadcast event kind. Every method may be called from any thread; none of
/// them waits for a callback to finish.
///
/// Dispatch only takes read locks, so callbacks running concurrently may
/// register or remove bindings. Such changes apply to the next event.
pub struct InputSystem {
    executor: Arc<dyn Executor>,
    keyboard: RwLock<KeyboardDispatcher>,
    buttons: RwLock<ButtonDispatcher>,
    mouse_moved: RwLock<ObserverList<MouseMoved>>,
    wheel_moved: RwLock<ObserverList<WheelMoved>>,
    text_entered: RwLock<ObserverList<TextEntered>>,
}

impl InputSystem {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            keyboard: RwLock::new(KeyboardDispatcher::new()),
            buttons: RwLock::new(ButtonDispatcher::new()),
            mouse_moved: RwLock::new(ObserverList::new()),
            wheel_moved: RwLock::new(ObserverList::new()),
            text_entered: RwLock::new(ObserverList::new()),
        }
    }

    /// The executor callbacks are submitted to
    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    /// Keyboard dispatcher, locked for registration. Do not hold the guard
    /// across event delivery on the same thread.
    pub fn keyboard(&self) -> RwLockWriteGuard<'_, KeyboardDispatcher> {
        self.keyboard.write()
    }

    /// Mouse button dispatcher, locked for registration
    pub fn buttons(&self) -> RwLockWriteGuard<'_, ButtonDispatcher> {
        self.buttons.write()
    }

    /// Read-only view of the keyboard dispatcher
    pub fn keyboard_view(&self) -> RwLockReadGuard<'_, KeyboardDispatcher> {
        self.keyboard.read()
    }

    /// Read-only view of the mouse button dispatcher
    pub fn buttons_view(&self) -> RwLockReadGuard<'_, ButtonDispatcher> {
        self.buttons.read()
    }

    pub fn key_pressed(&self, code: KeyCode, modifiers: Modifiers) -> usize {
        self.dispatch_key(EventKey::new(code, modifiers, true))
    }

    pub fn key_released(&self, code: KeyCode, modifiers: Modifiers) -> usize {
        self.dispatch_key(EventKey::new(code, modifiers, false))
    }

    /// Exact chord first, then its modifier-only twin. Returns the number of
    /// callbacks submitted across both passes.
    fn dispatch_key(&self, key: EventKey) -> usize {
        let dispatcher = self.keyboard.read();
        let executor: &dyn Executor = &*self.executor;

        let mut hits = dispatcher.dispatch(&key, &key, executor);
        if !key.is_modifier_only() {
            let twin = key.modifier_only();
            hits += dispatcher.dispatch(&twin, &twin, executor);
        }

        trace!(%key, hits, "Key dispatched");
        hits
    }

    pub fn button_pressed(&self, button: MouseButton, position: Position) -> usize {
        self.dispatch_button(EventButton::pressed(button), position)
    }

    pub fn button_released(&self, button: MouseButton, position: Position) -> usize {
        self.dispatch_button(EventButton::released(button), position)
    }

    fn dispatch_button(&self, event: EventButton, position: Position) -> usize {
        let click = ButtonClick { event, position };
        let hits = self.buttons.read().dispatch(&event, &click, &*self.executor);
        trace!(?event, x = position.x, y = position.y, hits, "Button dispatched");
        hits
    }

    pub fn mouse_moved(&self, position: Position) {
        self.mouse_moved
            .read()
            .notify(&MouseMoved { position }, &*self.executor);
    }

    pub fn wheel_moved(&self, delta: i32, position: Position) {
        self.wheel_moved
            .read()
            .notify(&WheelMoved { delta, position }, &*self.executor);
    }

    pub fn text_entered(&self, character: char) {
        self.text_entered
            .read()
            .notify(&TextEntered { character }, &*self.executor);
    }

    pub fn on_mouse_moved<F>(&self, observer: F) -> Handle<MouseMoved>
    where
        F: Fn(MouseMoved) + Send + Sync + 'static,
    {
        self.mouse_moved.write().subscribe(observer)
    }

    pub fn remove_mouse_moved(&self, handle: Handle<MouseMoved>) -> bool {
        self.mouse_moved.write().unsubscribe(handle)
    }

    pub fn on_wheel_moved<F>(&self, observer: F) -> Handle<WheelMoved>
    where
        F: Fn(WheelMoved) + Send + Sync + 'static,
    {
        self.wheel_moved.write().subscribe(observer)
    }

    pub fn remove_wheel_moved(&self, handle: Handle<WheelMoved>) -> bool {
        self.wheel_moved.write().unsubscribe(handle)
    }

    pub fn on_text_entered<F>(&self, observer: F) -> Handle<TextEntered>
    where
        F: Fn(TextEntered) + Send + Sync + 'static,
    {
        self.text_entered.write().subscribe(observer)
    }

    pub fn remove_text_entered(&self, handle: Handle<TextEntered>) -> bool {
        self.text_entered.write().unsubscribe(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::executor::ManualExecutor;
    use crate::input::handler::{ButtonHandler, KeyboardHandler};
    use crate::input::set::{ButtonSet, KeyboardSet};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    fn system() -> (Arc<ManualExecutor>, InputSystem) {
        let executor = Arc::new(ManualExecutor::new());
        let input = InputSystem::new(executor.clone());
        (executor, input)
    }

    #[test]
    fn test_modifier_key_dispatched_once() {
        let (executor, input) = system();
        let chord = EventKey::pressed(KeyCode::Modifier).with_modifiers(Modifiers::ALT);
        input
            .keyboard()
            .add(KeyboardSet::new().with(KeyboardHandler::new().with(chord, |_| {})));

        assert_eq!(input.key_pressed(KeyCode::Modifier, Modifiers::ALT), 1);
        assert_eq!(executor.run_pending(), 1);
    }

    #[test]
    fn test_release_does_not_match_press_binding() {
        let (executor, input) = system();
        input.keyboard().add(
            KeyboardSet::new()
                .with(KeyboardHandler::new().with(EventKey::pressed(KeyCode::Q), |_| {})),
        );

        assert_eq!(input.key_released(KeyCode::Q, Modifiers::NONE), 0);
        assert_eq!(executor.pending(), 0);
    }

    #[test]
    fn test_button_callback_receives_position() {
        let (executor, input) = system();
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicks);
        input.buttons().add(ButtonSet::new().with(ButtonHandler::new().with(
            EventButton::pressed(MouseButton::Right),
            move |click| sink.lock().push(click),
        )));

        input.button_pressed(MouseButton::Right, Position::new(12, -3));
        input.button_released(MouseButton::Right, Position::new(12, -3));
        executor.run_pending();

        assert_eq!(
            *clicks.lock(),
            vec![ButtonClick {
                event: EventButton::pressed(MouseButton::Right),
                position: Position::new(12, -3),
            }]
        );
    }

    #[test]
    fn test_broadcast_observers() {
        let (executor, input) = system();
        let log = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&log);
        input.on_mouse_moved(move |m| sink.lock().push(format!("move {},{}", m.position.x, m.position.y)));
        let sink = Arc::clone(&log);
        let wheel = input.on_wheel_moved(move |w| sink.lock().push(format!("wheel {}", w.delta)));
        let sink = Arc::clone(&log);
        input.on_text_entered(move |t| sink.lock().push(format!("text {}", t.character)));

        input.mouse_moved(Position::new(4, 5));
        input.wheel_moved(-2, Position::new(4, 5));
        input.text_entered('é');
        executor.run_pending();

        assert_eq!(*log.lock(), vec!["move 4,5", "wheel -2", "text é"]);

        assert!(input.remove_wheel_moved(wheel));
        assert!(!input.remove_wheel_moved(wheel));
        input.wheel_moved(1, Position::default());
        assert_eq!(executor.pending(), 0);
    }
}
