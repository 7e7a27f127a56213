use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by games built on the runtime.
pub trait App {
    /// Called once per rendered frame, after the clock has ticked.
    ///
    /// Implementations update their state from `ctx.input` and `ctx.time.dt`,
    /// then draw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called exactly once before the loop exits (exit key, window close, or
    /// an `Exit` returned from `on_frame`). GPU resources owned by the app
    /// should be released here while the device is still alive.
    fn on_exit(&mut self, gpu: &Gpu<'_>) {
        let _ = gpu;
    }
}
