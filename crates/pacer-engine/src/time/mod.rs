//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `Clock` per render loop
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - feed `Clock::fps()` to an `FpsReporter` for periodic display

mod clock;
mod fps_report;
mod source;

pub use clock::{Clock, FrameTime};
pub use fps_report::FpsReporter;
pub use source::{ManualSource, MonotonicSource, TimeSource};
