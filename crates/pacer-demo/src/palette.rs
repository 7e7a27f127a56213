use pacer_engine::paint::Color;

/// Ball colours, cycled in order.
const PALETTE: [(f32, f32, f32); 6] = [
    (1.0, 0.0, 0.0),
    (0.0, 1.0, 0.0),
    (0.3, 0.2, 1.0),
    (0.0, 0.0, 1.0),
    (0.7, 0.0, 0.5),
    (0.5, 0.2, 0.0),
];

/// Minimum wall time between palette steps.
pub const STEP_MS: u64 = 50;

/// Time-driven walk through [`PALETTE`].
///
/// Each `poll` advances at most one entry, and only once more than
/// [`STEP_MS`] has passed since the last advance (measured from 0).
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    index: usize,
    last_step_ms: u64,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the cycle advanced.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_step_ms) > STEP_MS {
            self.last_step_ms = now_ms;
            self.index = (self.index + 1) % PALETTE.len();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current entry with alpha `a`.
    pub fn current(&self, a: f32) -> Color {
        entry(self.index, a)
    }

    /// The entry after the current one, wrapping.
    pub fn next(&self, a: f32) -> Color {
        entry((self.index + 1) % PALETTE.len(), a)
    }
}

fn entry(i: usize, a: f32) -> Color {
    let (r, g, b) = PALETTE[i];
    Color::from_straight(r, g, b, a)
}
