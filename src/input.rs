/// Per-tick input snapshot.
///
/// The frontend polls the keyboard once per frame and hands the game a
/// `FrameInput`: which logical keys are held, which went down this frame,
/// and any characters typed (used by the save-slot and name prompts).

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Shoot; also starts a new game from the title screen.
    Fire,
    /// Pause / resume / back / restart.
    Menu,
    Save,
    Load,
    Confirm,
    Backspace,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    typed: Vec<char>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: mark `key` as held down.
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Builder: mark `key` as pressed this frame. A press implies held.
    pub fn press(mut self, key: Key) -> Self {
        self.pressed.insert(key);
        self.held.insert(key);
        self
    }

    /// Builder: append typed characters.
    pub fn type_text(mut self, text: &str) -> Self {
        self.typed.extend(text.chars());
        self
    }

    pub fn set_held(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn set_pressed(&mut self, key: Key) {
        self.pressed.insert(key);
        self.held.insert(key);
    }

    pub fn push_char(&mut self, c: char) {
        self.typed.push(c);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Edge-triggered: true only on the frame the key went down.
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    /// First typed character this frame, if any.
    pub fn first_char(&self) -> Option<char> {
        self.typed.first().copied()
    }

    /// First typed character parsed as a decimal digit. Anything else reads
    /// as "no input".
    pub fn typed_digit(&self) -> Option<u32> {
        self.first_char().and_then(|c| c.to_digit(10))
    }
}
