/// Default spacing between two FPS reports, in milliseconds.
const DEFAULT_INTERVAL_MS: u64 = 2000;

/// Rate limiter for displaying the smoothed FPS value.
///
/// The clock refreshes its FPS value every second; reporters (window title,
/// log line) only need it every couple of seconds.
#[derive(Debug, Clone)]
pub struct FpsReporter {
    interval_ms: u64,
    last_report_ms: u64,
}

impl FpsReporter {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_INTERVAL_MS)
    }

    pub fn with_interval(interval_ms: u64) -> Self {
        Self { interval_ms, last_report_ms: 0 }
    }

    /// Returns `Some(fps)` when more than one interval has passed since the
    /// previous report, and records `now_ms` as the new report time.
    pub fn poll(&mut self, now_ms: u64, fps: f64) -> Option<f64> {
        if now_ms.saturating_sub(self.last_report_ms) > self.interval_ms {
            self.last_report_ms = now_ms;
            Some(fps)
        } else {
            None
        }
    }

    /// Formats a window title carrying the FPS value.
    pub fn title(base: &str, fps: f64) -> String {
        format!("{base} | FPS: {fps:.2}")
    }
}

impl Default for FpsReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_interval_exceeded() {
        let mut r = FpsReporter::new();
        assert_eq!(r.poll(0, 60.0), None);
        assert_eq!(r.poll(2000, 60.0), None);
        assert_eq!(r.poll(2001, 59.5), Some(59.5));
    }

    #[test]
    fn waits_a_full_interval_after_reporting() {
        let mut r = FpsReporter::with_interval(100);
        assert_eq!(r.poll(101, 30.0), Some(30.0));
        assert_eq!(r.poll(150, 30.0), None);
        assert_eq!(r.poll(201, 30.0), None);
        assert_eq!(r.poll(202, 31.0), Some(31.0));
    }

    #[test]
    fn title_has_two_decimals() {
        assert_eq!(FpsReporter::title("pacer", 60.9390609), "pacer | FPS: 60.94");
    }
}
