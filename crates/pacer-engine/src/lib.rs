//! Pacer engine crate.
//!
//! Frame pacing, button input and motion integration for small real-time
//! games, plus the winit/wgpu runtime that drives them.

pub mod assets;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod motion;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
