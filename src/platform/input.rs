//! Logical keyboard input
//!
//! Raw key events are reduced to a set of currently held logical keys. The
//! directional keys feed Controlled motion every tick; Escape is a discrete
//! pause toggle.

use std::collections::HashSet;

use crate::sim::Directions;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowUp" => Key::ArrowUp,
            "ArrowRight" => Key::ArrowRight,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true if the key was not already held
    /// (i.e. this is a fresh press, not auto-repeat).
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn contains(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop everything (e.g. on focus loss, when key-ups would be missed)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn directions(&self) -> Directions {
        Directions {
            up: self.contains(Key::ArrowUp),
            right: self.contains(Key::ArrowRight),
            down: self.contains(Key::ArrowDown),
            left: self.contains(Key::ArrowLeft),
        }
    }
}
