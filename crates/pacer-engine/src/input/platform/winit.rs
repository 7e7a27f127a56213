use winit::event::{ElementState, KeyEvent as WinitKeyEvent};
use winit::keyboard::{Key, NamedKey};

use crate::input::{KeyEvent, KeyState};

/// Translates a winit keyboard event into an engine `KeyEvent`.
///
/// Returns `None` for keys that have no single-character code. Auto-repeats
/// come through as ordinary presses.
pub fn translate_key_event(event: &WinitKeyEvent) -> Option<KeyEvent> {
    let code = key_code(&event.logical_key)?;
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    Some(KeyEvent { code, state })
}

/// Maps a logical key to its character code.
///
/// Printable keys use the first character of their text. Enter and Escape
/// use their ASCII control codes.
pub fn key_code(key: &Key) -> Option<char> {
    match key {
        Key::Character(text) => text.chars().next(),
        Key::Named(NamedKey::Enter) => Some('\n'),
        Key::Named(NamedKey::Escape) => Some('\u{1b}'),
        Key::Named(NamedKey::Space) => Some(' '),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    #[test]
    fn character_keys_use_first_char() {
        assert_eq!(key_code(&Key::Character(SmolStr::new("W"))), Some('W'));
        assert_eq!(key_code(&Key::Character(SmolStr::new("a"))), Some('a'));
    }

    #[test]
    fn control_keys_use_ascii_codes() {
        assert_eq!(key_code(&Key::Named(NamedKey::Enter)), Some('\n'));
        assert_eq!(key_code(&Key::Named(NamedKey::Escape)), Some('\u{1b}'));
    }

    #[test]
    fn other_named_keys_are_dropped() {
        assert_eq!(key_code(&Key::Named(NamedKey::ArrowUp)), None);
        assert_eq!(key_code(&Key::Named(NamedKey::Shift)), None);
    }
}
