use super::types::{ButtonEvent, ButtonId, KeyEvent};

/// ASCII escape.
const ESCAPE: char = '\u{1b}';

/// What a raw key means to the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Button(ButtonId),
    /// Terminates the application on key-down.
    Exit,
}

/// Fixed table from character codes to key actions.
///
/// Letters are matched case-insensitively. Anything not in the table is
/// ignored by the caller.
#[derive(Debug, Copy, Clone, Default)]
pub struct KeyMap;

impl KeyMap {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, code: char) -> Option<KeyAction> {
        let action = match code.to_ascii_lowercase() {
            'w' => KeyAction::Button(ButtonId::Up),
            'a' => KeyAction::Button(ButtonId::Left),
            's' => KeyAction::Button(ButtonId::Down),
            'd' => KeyAction::Button(ButtonId::Right),
            'k' => KeyAction::Button(ButtonId::Action1),
            'i' => KeyAction::Button(ButtonId::Action2),
            '\n' => KeyAction::Button(ButtonId::Start),
            ESCAPE => KeyAction::Exit,
            _ => return None,
        };
        Some(action)
    }

    /// Maps a raw key event to a button transition.
    ///
    /// Returns `None` for unmapped keys and for the exit key, which carries
    /// no button state.
    pub fn button_event(&self, ev: &KeyEvent) -> Option<ButtonEvent> {
        match self.resolve(ev.code)? {
            KeyAction::Button(button) => Some(ButtonEvent::new(button, ev.state.is_pressed())),
            KeyAction::Exit => None,
        }
    }

    /// True for a key-down of the exit key.
    pub fn is_exit(&self, ev: &KeyEvent) -> bool {
        ev.state.is_pressed() && self.resolve(ev.code) == Some(KeyAction::Exit)
    }
}
