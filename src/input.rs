//! Keyboard state tracking for the render loop.
//!
//! Translates raw winit keyboard events into held / just-pressed sets the
//! per-frame input step can poll. Continuous actions (parameter shifts) use
//! [`Input::key_held`]; one-shot actions (parameter report) use
//! [`Input::key_pressed`].

use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// The keys the viewer binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    R,
    Up,
    Down,
    Left,
    Right,
    Period,
    Comma,
    Enter,
    Escape,
}

impl KeyCode {
    fn from_winit(key: WinitKeyCode) -> Option<Self> {
        match key {
            WinitKeyCode::KeyW => Some(KeyCode::W),
            WinitKeyCode::KeyA => Some(KeyCode::A),
            WinitKeyCode::KeyS => Some(KeyCode::S),
            WinitKeyCode::KeyD => Some(KeyCode::D),
            WinitKeyCode::KeyR => Some(KeyCode::R),
            WinitKeyCode::ArrowUp => Some(KeyCode::Up),
            WinitKeyCode::ArrowDown => Some(KeyCode::Down),
            WinitKeyCode::ArrowLeft => Some(KeyCode::Left),
            WinitKeyCode::ArrowRight => Some(KeyCode::Right),
            WinitKeyCode::Period => Some(KeyCode::Period),
            WinitKeyCode::Comma => Some(KeyCode::Comma),
            WinitKeyCode::Enter => Some(KeyCode::Enter),
            WinitKeyCode::Escape => Some(KeyCode::Escape),
            _ => None,
        }
    }
}

/// Keyboard state, updated from window events and polled once per frame.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Clear per-frame state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(code) = event.physical_key {
                let Some(key) = KeyCode::from_winit(code) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        // Suppress OS key repeat for the pressed set.
                        if !self.keys_held.contains(&key) {
                            self.keys_pressed.insert(key);
                        }
                        self.keys_held.insert(key);
                    }
                    ElementState::Released => {
                        self.keys_held.remove(&key);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_persists_across_frames_but_pressed_does_not() {
        let mut input = Input::new();

        input.keys_pressed.insert(KeyCode::W);
        input.keys_held.insert(KeyCode::W);

        assert!(input.key_held(KeyCode::W));
        assert!(input.key_pressed(KeyCode::W));

        input.end_frame();
        assert!(input.key_held(KeyCode::W));
        assert!(!input.key_pressed(KeyCode::W));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(KeyCode::from_winit(WinitKeyCode::KeyZ), None);
        assert_eq!(KeyCode::from_winit(WinitKeyCode::Period), Some(KeyCode::Period));
    }
}
