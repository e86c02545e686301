//! Integration tests for handler sets, dispatchers and the input system

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use goldcore::geometry::Position;
use goldcore::input::{
    ButtonHandler, ButtonSet, EventButton, EventKey, Handle, InputSystem, KeyCode,
    KeyboardHandler, KeyboardSet, ManualExecutor, Modifiers, MouseButton, SetHandle, TokioExecutor,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

type Log = Arc<Mutex<Vec<&'static str>>>;

fn manual_input() -> (Arc<ManualExecutor>, InputSystem) {
    let executor = Arc::new(ManualExecutor::new());
    let input = InputSystem::new(executor.clone());
    (executor, input)
}

fn logging(key: EventKey, name: &'static str, log: &Log) -> KeyboardHandler {
    let log = Arc::clone(log);
    KeyboardHandler::new().with(key, move |_| log.lock().push(name))
}

fn drain(executor: &ManualExecutor, log: &Log) -> Vec<&'static str> {
    executor.run_pending();
    std::mem::take(&mut *log.lock())
}

fn sorted(mut names: Vec<&'static str>) -> Vec<&'static str> {
    names.sort_unstable();
    names
}

/// Every handle before `active_len` is active, every one after is not
fn assert_partitioned<T>(
    handles: &[Handle<T>],
    active_len: usize,
    is_active: impl Fn(Handle<T>) -> bool,
) {
    for (index, handle) in handles.iter().enumerate() {
        assert_eq!(
            is_active(*handle),
            index < active_len,
            "handle {handle} at index {index} with active_len {active_len}"
        );
    }
}

#[test]
fn test_partition_holds_after_mixed_operations() {
    let (_executor, input) = manual_input();
    let mut set = KeyboardSet::new();
    let mut live: Vec<Handle<KeyboardHandler>> = Vec::new();
    let mut seed = 0x2545_f491_u64;

    for _ in 0..300 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;

        let pick = |live: &Vec<Handle<KeyboardHandler>>| live[(seed >> 8) as usize % live.len()];
        match seed % 4 {
            0 | 1 if live.len() < 16 => live.push(set.add(KeyboardHandler::new())),
            2 if !live.is_empty() => {
                let handle = pick(&live);
                set.set_active(handle, !set.is_active(handle));
            }
            3 if !live.is_empty() => {
                let handle = pick(&live);
                set.remove(handle);
                live.retain(|h| *h != handle);
            }
            _ => {}
        }

        assert_partitioned(&set.handles(), set.active_len(), |h| set.is_active(h));
    }

    // Same discipline one level up
    let mut keyboard = input.keyboard();
    let a = keyboard.add(KeyboardSet::new());
    let b = keyboard.add(KeyboardSet::new());
    let c = keyboard.add(KeyboardSet::new());
    keyboard.set_active(a, false);
    keyboard.set_active(c, false);
    keyboard.set_active(a, true);
    keyboard.remove(b);
    assert_partitioned(&keyboard.handles(), keyboard.active_len(), |h| {
        keyboard.is_active(h)
    });
}

#[test]
fn test_remove_is_idempotent() {
    let (executor, input) = manual_input();
    let log = Log::default();
    let key = EventKey::pressed(KeyCode::R);

    let mut set = KeyboardSet::new();
    let keep = set.add(logging(key, "keep", &log));
    let gone = set.add(logging(key, "gone", &log));
    let handle = input.keyboard().add(set);

    for _ in 0..2 {
        input
            .keyboard()
            .set_mut(handle)
            .expect("set registered")
            .remove(gone);
    }

    let view = input.keyboard_view();
    let set = view.set(handle).expect("set registered");
    assert_eq!(set.handles(), vec![keep]);
    assert_eq!(set.active_len(), 1);
    drop(view);

    input.key_pressed(KeyCode::R, Modifiers::NONE);
    assert_eq!(drain(&executor, &log), vec!["keep"]);

    // Same for whole sets
    assert!(input.keyboard().remove(handle).is_some());
    assert!(input.keyboard().remove(handle).is_none());
    assert!(input.keyboard_view().is_empty());
}

#[test]
fn test_handles_are_scoped_to_their_container() {
    let (executor, input) = manual_input();
    let log = Log::default();
    let key = EventKey::pressed(KeyCode::Tab);

    let mut set = KeyboardSet::new();
    let handler = set.add(logging(key, "handler", &log));
    let set_handle = input.keyboard().add(set);

    // Both counters start at zero; the types keep them apart
    assert_eq!(handler.id(), set_handle.id());

    let removed = input
        .keyboard()
        .set_mut(set_handle)
        .expect("set registered")
        .remove(handler);
    assert!(removed.is_some());
    assert!(input.keyboard_view().set(set_handle).is_some());

    input.key_pressed(KeyCode::Tab, Modifiers::NONE);
    assert!(drain(&executor, &log).is_empty());
}

#[test]
fn test_exact_chord_then_modifier_only() {
    let (executor, input) = manual_input();
    let log = Log::default();
    let shift_a = EventKey::pressed(KeyCode::A).with_modifiers(Modifiers::SHIFT);

    // Registered modifier-first so order comes from the passes, not the storage
    input.keyboard().add(
        KeyboardSet::new()
            .with(logging(shift_a.modifier_only(), "modifier", &log))
            .with(logging(shift_a, "exact", &log)),
    );

    assert_eq!(input.key_pressed(KeyCode::A, Modifiers::SHIFT), 2);
    assert_eq!(drain(&executor, &log), vec!["exact", "modifier"]);

    // Different modifiers match neither
    assert_eq!(input.key_pressed(KeyCode::A, Modifiers::CONTROL), 0);
    assert_eq!(
        input.key_pressed(KeyCode::A, Modifiers::SHIFT | Modifiers::CONTROL),
        0
    );
}

#[test]
fn test_modifier_only_callback_receives_matched_chord() {
    let (executor, input) = manual_input();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let chord = EventKey::pressed(KeyCode::Modifier).with_modifiers(Modifiers::CONTROL);
    input.keyboard().add(
        KeyboardSet::new().with(KeyboardHandler::new().with(chord, move |k| sink.lock().push(k))),
    );

    input.key_pressed(KeyCode::S, Modifiers::CONTROL);
    executor.run_pending();

    assert_eq!(*seen.lock(), vec![chord]);
}

#[test]
fn test_toggling_a_handler() {
    let (executor, input) = manual_input();
    let log = Log::default();
    let e1 = EventKey::pressed(KeyCode::Num1);
    let e2 = EventKey::pressed(KeyCode::Num2);

    let mut set = KeyboardSet::new();
    set.add(logging(e1, "h1", &log));
    let h2 = set.add(logging(e1, "h2", &log));
    set.add(logging(e2, "h3", &log));
    let handle = input.keyboard().add(set);

    let toggle = |active: bool| {
        input
            .keyboard()
            .set_mut(handle)
            .expect("set registered")
            .set_active(h2, active);
    };

    toggle(false);
    input.key_pressed(KeyCode::Num1, Modifiers::NONE);
    assert_eq!(drain(&executor, &log), vec!["h1"]);

    toggle(true);
    input.key_pressed(KeyCode::Num1, Modifiers::NONE);
    assert_eq!(sorted(drain(&executor, &log)), vec!["h1", "h2"]);
}

#[test]
fn test_disabling_a_set_silences_all_of_its_handlers() {
    let (executor, input) = manual_input();
    let log = Log::default();
    let key = EventKey::pressed(KeyCode::Space);

    let mut set = KeyboardSet::new();
    let h1 = set.add(logging(key, "h1", &log));
    let h2 = set.add(logging(key, "h2", &log));
    let h3 = set.add(logging(key, "h3", &log));
    set.set_active(h2, false);
    let handle = input.keyboard().add(set);

    let other = input
        .keyboard()
        .add(KeyboardSet::new().with(logging(key, "other", &log)));

    input.keyboard().set_active(handle, false);
    input.key_pressed(KeyCode::Space, Modifiers::NONE);
    assert_eq!(drain(&executor, &log), vec!["other"]);

    input.keyboard().set_active(handle, true);
    {
        let view = input.keyboard_view();
        let set = view.set(handle).expect("set registered");
        assert!(set.is_active(h1));
        assert!(!set.is_active(h2));
        assert!(set.is_active(h3));
        assert!(view.is_active(other));
    }

    input.key_pressed(KeyCode::Space, Modifiers::NONE);
    assert_eq!(sorted(drain(&executor, &log)), vec!["h1", "h3", "other"]);
}

#[test]
fn test_counter_scenario() {
    let (executor, input) = manual_input();
    let counter = Arc::new(AtomicUsize::new(0));
    let press_a = EventKey::pressed(KeyCode::A);

    let make_handler = || {
        let counter = Arc::clone(&counter);
        KeyboardHandler::new().with(press_a, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    };

    let mut set = KeyboardSet::new();
    let first = set.add(make_handler());
    let set_handle = input.keyboard().add(set);

    let press = || {
        input.key_pressed(KeyCode::A, Modifiers::NONE);
        executor.run_pending();
        counter.load(Ordering::SeqCst)
    };

    assert_eq!(press(), 1);

    input
        .keyboard()
        .set_mut(set_handle)
        .expect("set registered")
        .remove(first);
    assert_eq!(press(), 1);

    let second = input
        .keyboard()
        .set_mut(set_handle)
        .expect("set registered")
        .add(make_handler());
    assert_ne!(first, second, "handles are never reused");

    input.keyboard().set_active(set_handle, false);
    assert_eq!(press(), 1);

    input.keyboard().set_active(set_handle, true);
    assert_eq!(press(), 2);
}

#[test]
fn test_button_dispatch_carries_position() {
    let (executor, input) = manual_input();
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicks);
    input.buttons().add(ButtonSet::new().with(ButtonHandler::new().with(
        EventButton::released(MouseButton::Middle),
        move |click| sink.lock().push(click.position),
    )));

    input.button_pressed(MouseButton::Middle, Position::new(3, 4));
    input.button_released(MouseButton::Middle, Position::new(5, 6));
    executor.run_pending();

    assert_eq!(*clicks.lock(), vec![Position::new(5, 6)]);
}

#[test]
fn test_callback_may_remove_its_own_set_during_dispatch() {
    let executor = Arc::new(TokioExecutor::new(2).expect("runtime should build"));
    let input = Arc::new(InputSystem::new(executor));
    let fired = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel();

    let slot: Arc<Mutex<Option<SetHandle<EventKey, EventKey>>>> = Arc::default();
    let key = EventKey::pressed(KeyCode::Delete);
    let handler = {
        let input = Arc::clone(&input);
        let slot = Arc::clone(&slot);
        let fired = Arc::clone(&fired);
        KeyboardHandler::new().with(key, move |_| {
            fired.fetch_add(1, Ordering::SeqCst);
            if let Some(handle) = slot.lock().take() {
                input.keyboard().remove(handle);
            }
            tx.send(()).ok();
        })
    };

    let handle = input.keyboard().add(
        KeyboardSet::new()
            .with(handler)
            .with(KeyboardHandler::new().with(key, |_| {})),
    );
    *slot.lock() = Some(handle);

    assert_eq!(input.key_pressed(KeyCode::Delete, Modifiers::NONE), 2);
    rx.recv_timeout(Duration::from_secs(5))
        .expect("callback should run");

    assert!(input.keyboard_view().is_empty());
    assert_eq!(input.key_pressed(KeyCode::Delete, Modifiers::NONE), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}
