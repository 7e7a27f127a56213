//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `KeyEvent`s,
//! resolving them through a `KeyMap` and feeding `ButtonEvent`s to `InputState`.

mod keymap;
mod state;
mod types;

pub mod platform;

pub use keymap::{KeyAction, KeyMap};
pub use state::InputState;
pub use types::{ButtonEvent, ButtonId, KeyEvent, KeyState};
