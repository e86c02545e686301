//! Event collection from winit

use std::collections::VecDeque;

use winit::event::{ElementState, Ime, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::geometry::{Position, Size};
use crate::input::{KeyCode, Modifiers, MouseButton};
use crate::window::{Event, EventSource};

/// Pixels per wheel notch. Line deltas are scaled up to pixels so both kinds
/// of device share one accumulator.
const PIXELS_PER_NOTCH: f64 = 20.0;

/// Translates winit window events into [`Event`]s
///
/// winit reports modifiers and cursor position as separate events, so both
/// are tracked here and attached to the key and button events that follow.
///
/// Wheel movement is reported in whole notches. Trackpads and smooth wheels
/// send fractions of a notch, which add up here until a notch is complete.
#[derive(Debug, Default)]
pub struct WinitEventSource {
    queue: VecDeque<Event>,
    modifiers: Modifiers,
    cursor: Position,
    /// Scroll not yet reported, in pixels
    scroll_remainder: f64,
}

impl WinitEventSource {
    /// Creates a new event source
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.queue.push_back(Event::Closed),

            WindowEvent::Resized(size) => self
                .queue
                .push_back(Event::Resized(Size::new(size.width, size.height))),

            WindowEvent::Focused(true) => self.queue.push_back(Event::GainedFocus),
            WindowEvent::Focused(false) => self.queue.push_back(Event::LostFocus),

            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    alt: state.alt_key(),
                    control: state.control_key(),
                    shift: state.shift_key(),
                    system: state.super_key(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let code = match event.physical_key {
                    PhysicalKey::Code(code) => KeyCode::from(code),
                    PhysicalKey::Unidentified(_) => KeyCode::Other,
                };
                let modifiers = self.modifiers;

                match event.state {
                    ElementState::Pressed => {
                        self.queue.push_back(Event::KeyPressed { code, modifiers });
                        if let Some(text) = &event.text {
                            self.push_text(text);
                        }
                    }
                    ElementState::Released => {
                        self.queue.push_back(Event::KeyReleased { code, modifiers })
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Position::new(position.x.round() as i32, position.y.round() as i32);
                self.queue.push_back(Event::MouseMoved(self.cursor));
            }

            WindowEvent::CursorEntered { .. } => self.queue.push_back(Event::MouseEntered),
            WindowEvent::CursorLeft { .. } => self.queue.push_back(Event::MouseLeft),

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = mouse_button(*button) else {
                    return;
                };
                let position = self.cursor;
                self.queue.push_back(match state {
                    ElementState::Pressed => Event::MouseButtonPressed { button, position },
                    ElementState::Released => Event::MouseButtonReleased { button, position },
                });
            }

            WindowEvent::Ime(Ime::Commit(text)) => self.push_text(text),

            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(*y) * PIXELS_PER_NOTCH,
                    MouseScrollDelta::PixelDelta(pos) => pos.y,
                };
                self.scroll(pixels);
            }

            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        self.queue.extend(
            text.chars()
                .filter(|c| !c.is_control())
                .map(Event::TextEntered),
        );
    }

    /// Adds to the pending scroll and reports any whole notches in it
    fn scroll(&mut self, pixels: f64) {
        self.scroll_remainder += pixels;

        let notches = (self.scroll_remainder / PIXELS_PER_NOTCH).trunc();
        if notches != 0.0 {
            self.scroll_remainder -= notches * PIXELS_PER_NOTCH;
            self.queue.push_back(Event::MouseWheelMoved {
                delta: notches as i32,
                position: self.cursor,
            });
        }
    }

    /// Modifiers currently held
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Last known cursor position
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Events waiting to be polled
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for WinitEventSource {
    fn poll_event(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }
}

fn mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Back => Some(MouseButton::XButton1),
        winit::event::MouseButton::Forward => Some(MouseButton::XButton2),
        winit::event::MouseButton::Other(_) => None,
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::KeyA => Self::A,
            WinitKeyCode::KeyB => Self::B,
            WinitKeyCode::KeyC => Self::C,
            WinitKeyCode::KeyD => Self::D,
            WinitKeyCode::KeyE => Self::E,
            WinitKeyCode::KeyF => Self::F,
            WinitKeyCode::KeyG => Self::G,
            WinitKeyCode::KeyH => Self::H,
            WinitKeyCode::KeyI => Self::I,
            WinitKeyCode::KeyJ => Self::J,
            WinitKeyCode::KeyK => Self::K,
            WinitKeyCode::KeyL => Self::L,
            WinitKeyCode::KeyM => Self::M,
            WinitKeyCode::KeyN => Self::N,
            WinitKeyCode::KeyO => Self::O,
            WinitKeyCode::KeyP => Self::P,
            WinitKeyCode::KeyQ => Self::Q,
            WinitKeyCode::KeyR => Self::R,
            WinitKeyCode::KeyS => Self::S,
            WinitKeyCode::KeyT => Self::T,
            WinitKeyCode::KeyU => Self::U,
            WinitKeyCode::KeyV => Self::V,
            WinitKeyCode::KeyW => Self::W,
            WinitKeyCode::KeyX => Self::X,
            WinitKeyCode::KeyY => Self::Y,
            WinitKeyCode::KeyZ => Self::Z,
            WinitKeyCode::Digit0 => Self::Num0,
            WinitKeyCode::Digit1 => Self::Num1,
            WinitKeyCode::Digit2 => Self::Num2,
            WinitKeyCode::Digit3 => Self::Num3,
            WinitKeyCode::Digit4 => Self::Num4,
            WinitKeyCode::Digit5 => Self::Num5,
            WinitKeyCode::Digit6 => Self::Num6,
            WinitKeyCode::Digit7 => Self::Num7,
            WinitKeyCode::Digit8 => Self::Num8,
            WinitKeyCode::Digit9 => Self::Num9,
            WinitKeyCode::ControlLeft => Self::LControl,
            WinitKeyCode::ShiftLeft => Self::LShift,
            WinitKeyCode::AltLeft => Self::LAlt,
            WinitKeyCode::SuperLeft => Self::LSystem,
            WinitKeyCode::ControlRight => Self::RControl,
            WinitKeyCode::ShiftRight => Self::RShift,
            WinitKeyCode::AltRight => Self::RAlt,
            WinitKeyCode::SuperRight => Self::RSystem,
            WinitKeyCode::BracketLeft => Self::LBracket,
            WinitKeyCode::BracketRight => Self::RBracket,
            WinitKeyCode::Semicolon => Self::Semicolon,
            WinitKeyCode::Comma => Self::Comma,
            WinitKeyCode::Period => Self::Period,
            WinitKeyCode::Quote => Self::Quote,
            WinitKeyCode::Slash => Self::Slash,
            WinitKeyCode::Backslash => Self::Backslash,
            WinitKeyCode::Backquote => Self::Tilde,
            WinitKeyCode::Equal => Self::Equal,
            WinitKeyCode::Minus => Self::Dash,
            WinitKeyCode::Escape => Self::Escape,
            WinitKeyCode::ContextMenu => Self::Menu,
            WinitKeyCode::Space => Self::Space,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => Self::Enter,
            WinitKeyCode::Backspace => Self::Backspace,
            WinitKeyCode::Tab => Self::Tab,
            WinitKeyCode::PageUp => Self::PageUp,
            WinitKeyCode::PageDown => Self::PageDown,
            WinitKeyCode::End => Self::End,
            WinitKeyCode::Home => Self::Home,
            WinitKeyCode::Insert => Self::Insert,
            WinitKeyCode::Delete => Self::Delete,
            WinitKeyCode::Pause => Self::Pause,
            WinitKeyCode::NumpadAdd => Self::Add,
            WinitKeyCode::NumpadSubtract => Self::Subtract,
            WinitKeyCode::NumpadMultiply => Self::Multiply,
            WinitKeyCode::NumpadDivide => Self::Divide,
            WinitKeyCode::Numpad0 => Self::Numpad0,
            WinitKeyCode::Numpad1 => Self::Numpad1,
            WinitKeyCode::Numpad2 => Self::Numpad2,
            WinitKeyCode::Numpad3 => Self::Numpad3,
            WinitKeyCode::Numpad4 => Self::Numpad4,
            WinitKeyCode::Numpad5 => Self::Numpad5,
            WinitKeyCode::Numpad6 => Self::Numpad6,
            WinitKeyCode::Numpad7 => Self::Numpad7,
            WinitKeyCode::Numpad8 => Self::Numpad8,
            WinitKeyCode::Numpad9 => Self::Numpad9,
            WinitKeyCode::ArrowLeft => Self::Left,
            WinitKeyCode::ArrowRight => Self::Right,
            WinitKeyCode::ArrowUp => Self::Up,
            WinitKeyCode::ArrowDown => Self::Down,
            WinitKeyCode::F1 => Self::F1,
            WinitKeyCode::F2 => Self::F2,
            WinitKeyCode::F3 => Self::F3,
            WinitKeyCode::F4 => Self::F4,
            WinitKeyCode::F5 => Self::F5,
            WinitKeyCode::F6 => Self::F6,
            WinitKeyCode::F7 => Self::F7,
            WinitKeyCode::F8 => Self::F8,
            WinitKeyCode::F9 => Self::F9,
            WinitKeyCode::F10 => Self::F10,
            WinitKeyCode::F11 => Self::F11,
            WinitKeyCode::F12 => Self::F12,
            WinitKeyCode::F13 => Self::F13,
            WinitKeyCode::F14 => Self::F14,
            WinitKeyCode::F15 => Self::F15,
            _ => Self::Other,
        }
    }
}
