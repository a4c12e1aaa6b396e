//! Keyboard input
//!
//! Keys are named the way browser `KeyboardEvent.key` and most windowing
//! crates report them, so any front end can feed `Key::from_name`.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    Enter,
    Escape,
    Backspace,
    /// Printable character, as typed
    Char(char),
}

impl Key {
    /// Parse a key name such as `"ArrowLeft"`, `"Enter"`, `" "` or `"q"`
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name {
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "ArrowUp" | "Up" => Key::Up,
            " " | "Space" | "Spacebar" => Key::Space,
            "Enter" | "Return" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Same key regardless of shift state
    fn matches_char(&self, c: char) -> bool {
        matches!(self, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: Vec<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if !self.held.contains(&key) {
            self.held.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.retain(|k| *k != key);
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput::from_held(&self.held)
    }
}

impl TickInput {
    /// Steering intent from held keys: arrows or A/D/W, space to fire
    pub fn from_held(held: &[Key]) -> TickInput {
        let any = |key: Key, alt: char| held.iter().any(|k| *k == key || k.matches_char(alt));
        TickInput {
            turn_left: any(Key::Left, 'a'),
            turn_right: any(Key::Right, 'd'),
            thrust: any(Key::Up, 'w'),
            fire: held.contains(&Key::Space),
            idle_mode: false,
        }
    }
}
