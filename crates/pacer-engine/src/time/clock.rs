use super::source::{MonotonicSource, TimeSource};

/// Length of the FPS averaging window, in milliseconds.
const FPS_WINDOW_MS: u64 = 1000;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f64,

    /// Time elapsed since the previous frame tick, in milliseconds.
    pub delta_ms: u64,

    /// Timestamp of the tick as reported by the clock's source.
    pub now_ms: u64,

    /// Monotonic frame counter. Never reset.
    pub frame_index: u64,
}

/// Frame clock producing per-frame delta time and a smoothed FPS value.
///
/// Delta time is the raw difference between two consecutive samples, so
/// physics stays responsive every frame. The FPS value is only recomputed
/// once more than a second has passed since the last recompute, which keeps
/// any displayed rate from jittering.
#[derive(Debug, Clone)]
pub struct Clock<S = MonotonicSource> {
    source: S,

    last_sample_ms: u64,
    current_sample_ms: u64,

    /// Frames counted in the current FPS window.
    frame_count: u32,
    window_start_ms: u64,
    smoothed_fps: f64,

    frame_index: u64,
}

impl Clock<MonotonicSource> {
    /// Creates a clock backed by the process monotonic timer.
    pub fn new() -> Self {
        Self::with_source(MonotonicSource::new())
    }
}

impl Default for Clock<MonotonicSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> Clock<S> {
    /// Creates a clock reading from `source`.
    ///
    /// All samples start at zero, matching a timer that counts from program
    /// start. The first tick therefore reports the time since zero as its delta.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            last_sample_ms: 0,
            current_sample_ms: 0,
            frame_count: 0,
            window_start_ms: 0,
            smoothed_fps: 1.0,
            frame_index: 0,
        }
    }

    /// Samples the source once and advances the clock.
    pub fn tick(&mut self) -> FrameTime {
        self.frame_count += 1;
        self.last_sample_ms = self.current_sample_ms;
        self.current_sample_ms = self.source.now_ms();

        let elapsed = self.current_sample_ms.saturating_sub(self.window_start_ms);
        if elapsed > FPS_WINDOW_MS {
            self.smoothed_fps = self.frame_count as f64 * 1000.0 / elapsed as f64;
            self.window_start_ms = self.current_sample_ms;
            self.frame_count = 0;
        }

        let ft = FrameTime {
            dt: self.delta_time_seconds(),
            delta_ms: self.delta_ms(),
            now_ms: self.current_sample_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    /// Milliseconds between the two most recent samples.
    #[inline]
    pub fn delta_ms(&self) -> u64 {
        self.current_sample_ms.saturating_sub(self.last_sample_ms)
    }

    /// Seconds between the two most recent samples. This is the unit all
    /// motion integration consumes.
    #[inline]
    pub fn delta_time_seconds(&self) -> f64 {
        self.delta_ms() as f64 / 1000.0
    }

    /// Last smoothed frames-per-second value; `1.0` until the first window closes.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.smoothed_fps
    }

    /// Most recent sample, in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.current_sample_ms
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    #[inline]
    pub fn window_start_ms(&self) -> u64 {
        self.window_start_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualSource;

    fn manual_clock() -> (ManualSource, Clock<ManualSource>) {
        let src = ManualSource::new(0);
        let clock = Clock::with_source(src.clone());
        (src, clock)
    }

    // ── delta time ────────────────────────────────────────────────────────

    #[test]
    fn delta_is_difference_between_samples() {
        let (src, mut clock) = manual_clock();
        src.set(100);
        clock.tick();
        src.set(116);
        let ft = clock.tick();

        assert_eq!(ft.delta_ms, 16);
        assert_eq!(clock.delta_ms(), 16);
        assert!((clock.delta_time_seconds() - 0.016).abs() < 1e-12);
        assert_eq!(ft.dt, clock.delta_time_seconds());
    }

    #[test]
    fn first_tick_measures_from_zero() {
        let (src, mut clock) = manual_clock();
        src.set(40);
        let ft = clock.tick();
        assert_eq!(ft.delta_ms, 40);
        assert_eq!(ft.now_ms, 40);
    }

    #[test]
    fn repeated_sample_gives_zero_delta() {
        let (src, mut clock) = manual_clock();
        src.set(50);
        clock.tick();
        let ft = clock.tick();
        assert_eq!(ft.delta_ms, 0);
        assert_eq!(ft.dt, 0.0);
    }

    #[test]
    fn frame_index_counts_every_tick() {
        let (src, mut clock) = manual_clock();
        for i in 0..5u64 {
            src.advance(500);
            assert_eq!(clock.tick().frame_index, i);
        }
    }

    // ── fps ───────────────────────────────────────────────────────────────

    #[test]
    fn fps_is_sentinel_before_first_window() {
        let (src, mut clock) = manual_clock();
        assert_eq!(clock.fps(), 1.0);
        for _ in 0..10 {
            src.advance(16);
            clock.tick();
        }
        assert_eq!(clock.fps(), 1.0);
    }

    #[test]
    fn fps_recomputes_after_window_closes() {
        let (src, mut clock) = manual_clock();
        for i in 0..60u64 {
            src.set(i * 16);
            clock.tick();
        }
        assert_eq!(clock.fps(), 1.0);
        assert_eq!(clock.frame_count(), 60);

        src.set(1001);
        clock.tick();

        assert!((clock.fps() - 61_000.0 / 1001.0).abs() < 1e-9);
        assert!((clock.fps() - 60.94).abs() < 0.01);
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.window_start_ms(), 1001);
    }

    #[test]
    fn window_of_exactly_one_second_does_not_recompute() {
        let (src, mut clock) = manual_clock();
        src.set(1000);
        clock.tick();
        assert_eq!(clock.fps(), 1.0);
        assert_eq!(clock.frame_count(), 1);
        assert_eq!(clock.window_start_ms(), 0);
    }

    #[test]
    fn fps_holds_between_windows() {
        let (src, mut clock) = manual_clock();
        src.set(1001);
        clock.tick();
        let first = clock.fps();

        src.set(1500);
        clock.tick();
        assert_eq!(clock.fps(), first);

        src.set(2010);
        clock.tick();
        // Two frames over 1009ms since the window reset at 1001.
        assert!((clock.fps() - 2000.0 / 1009.0).abs() < 1e-9);
    }
}
