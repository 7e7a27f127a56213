//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single game window, and wires them to
//! the clock, input and GPU layers.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
