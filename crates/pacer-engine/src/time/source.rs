use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond timer sampled by [`Clock`](super::Clock).
///
/// Implementations must be monotonic non-decreasing. Nothing downstream
/// defends against a source that goes backwards.
pub trait TimeSource {
    fn now_ms(&self) -> u64;
}

/// Wall-clock source: milliseconds elapsed since the source was created.
#[derive(Debug, Clone)]
pub struct MonotonicSource {
    origin: Instant,
}

impl MonotonicSource {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicSource {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven source for tests and replays.
///
/// Clones share the same counter, so a test can keep one handle and give
/// the other to a `Clock`.
#[derive(Debug, Clone, Default)]
pub struct ManualSource {
    now: Rc<Cell<u64>>,
}

impl ManualSource {
    pub fn new(start_ms: u64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimeSource for ManualSource {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
