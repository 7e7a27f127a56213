use std::fmt;

/// Logical button identifier.
///
/// The set is closed: games bind to these, never to raw keys. Raw keys reach
/// a button only through a `KeyMap`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ButtonId {
    Up,
    Down,
    Left,
    Right,
    Start,
    Action1,
    Action2,
}

impl ButtonId {
    pub const COUNT: usize = 7;

    pub const ALL: [ButtonId; Self::COUNT] = [
        ButtonId::Up,
        ButtonId::Down,
        ButtonId::Left,
        ButtonId::Right,
        ButtonId::Start,
        ButtonId::Action1,
        ButtonId::Action2,
    ];

    /// Dense index in `0..COUNT`, in declaration order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single button transition, the only way `InputState` is mutated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ButtonEvent {
    pub button: ButtonId,
    pub pressed: bool,
}

impl ButtonEvent {
    #[inline]
    pub const fn new(button: ButtonId, pressed: bool) -> Self {
        Self { button, pressed }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == KeyState::Pressed
    }
}

/// Raw keyboard transition identified by a single character code.
///
/// Control keys use their ASCII codes (`'\n'` for Enter, `'\u{1b}'` for Escape).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub code: char,
    pub state: KeyState,
}

impl KeyEvent {
    #[inline]
    pub const fn pressed(code: char) -> Self {
        Self { code, state: KeyState::Pressed }
    }

    #[inline]
    pub const fn released(code: char) -> Self {
        Self { code, state: KeyState::Released }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_ordered() {
        for (i, b) in ButtonId::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
        assert_eq!(ButtonId::Action2.index(), ButtonId::COUNT - 1);
    }
}
