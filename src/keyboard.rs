/// Terminal keyboard → per-frame `FrameInput`.
///
/// Key events are not acted on one by one. Every live key remembers the frame
/// of its last press or repeat, and each frame the keys seen recently enough
/// (within `HOLD_WINDOW`) count as held. That lets Space and an arrow be held
/// together.
///
/// Terminals that speak the kitty keyboard protocol (Ghostty, kitty, ...)
/// send real release events and keys drop immediately. Elsewhere only
/// presses arrive, OS auto-repeat included, so a key expires after
/// `HOLD_WINDOW` quiet frames, which is shorter than the repeat interval.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use space_adventure::input::{FrameInput, Key};

/// Frames a key stays held after its last press or repeat. OS auto-repeat
/// runs at 15 Hz or faster, so at 30 FPS a held key is refreshed in time.
const HOLD_WINDOW: u64 = 4;

/// Arrow keys steer; letters are matched case-insensitively.
fn logical_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            ' ' => Some(Key::Fire),
            'm' => Some(Key::Menu),
            's' => Some(Key::Save),
            'l' => Some(Key::Load),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct Keyboard {
    /// Each live key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    pressed: Vec<KeyCode>,
    typed: Vec<char>,
    frame: u64,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal event. Returns `true` when the player asked to
    /// quit (Esc or Ctrl-C).
    pub fn handle(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        match kind {
            KeyEventKind::Press => {
                if *code == KeyCode::Esc {
                    return true;
                }
                if let KeyCode::Char(c) = code {
                    if modifiers.contains(KeyModifiers::CONTROL) {
                        return c.eq_ignore_ascii_case(&'c');
                    }
                    self.typed.push(*c);
                }
                self.key_frame.insert(*code, self.frame);
                self.pressed.push(*code);
            }
            // auto-repeat keeps the key alive
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(code);
            }
        }
        false
    }

    fn is_held(&self, code: &KeyCode) -> bool {
        self.key_frame
            .get(code)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Snapshot everything seen since the previous call and start the next
    /// frame.
    pub fn frame_input(&mut self) -> FrameInput {
        let mut input = FrameInput::new();
        for code in self.key_frame.keys() {
            if self.is_held(code) {
                if let Some(key) = logical_key(code) {
                    input.set_held(key);
                }
            }
        }
        for code in self.pressed.drain(..) {
            if let Some(key) = logical_key(&code) {
                input.set_pressed(key);
            }
        }
        for c in self.typed.drain(..) {
            input.push_char(c);
        }

        let frame = self.frame;
        self.key_frame
            .retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
        self.frame += 1;
        input
    }
}
