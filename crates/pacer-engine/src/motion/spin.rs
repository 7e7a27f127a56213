/// Constant-rate rotation with the angle kept in `[0, 360)` degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    pub angle_deg: f32,
    pub rate_deg_per_sec: f32,
}

impl Spin {
    pub const fn new(rate_deg_per_sec: f32) -> Self {
        Self { angle_deg: 0.0, rate_deg_per_sec }
    }

    pub fn advance(&mut self, dt: f64) {
        let a = (f64::from(self.angle_deg) + f64::from(self.rate_deg_per_sec) * dt) as f32;
        let wrapped = a - (a / 360.0).floor() * 360.0;
        // A tiny negative angle wraps to a value that rounds up to 360.
        self.angle_deg = if (0.0..360.0).contains(&wrapped) { wrapped } else { 0.0 };
    }

    #[inline]
    pub fn angle_rad(&self) -> f32 {
        self.angle_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_at_rate() {
        let mut s = Spin::new(45.0);
        s.advance(2.0);
        assert_eq!(s.angle_deg, 90.0);
    }

    #[test]
    fn wraps_past_full_turn() {
        let mut s = Spin::new(45.0);
        s.angle_deg = 350.0;
        s.advance(0.5);
        assert!((s.angle_deg - 12.5).abs() < 1e-4);
    }

    #[test]
    fn negative_rate_wraps_into_range() {
        let mut s = Spin::new(-90.0);
        s.advance(1.0);
        assert_eq!(s.angle_deg, 270.0);
    }

    #[test]
    fn tiny_negative_step_stays_below_full_turn() {
        let mut s = Spin::new(-45.0);
        s.advance(1e-8);
        assert!((0.0..360.0).contains(&s.angle_deg), "angle={}", s.angle_deg);
        assert_eq!(s.angle_deg, 0.0);
    }

    #[test]
    fn stays_in_range_over_many_frames() {
        let mut s = Spin::new(45.0);
        for _ in 0..100_000 {
            s.advance(0.016);
            assert!((0.0..360.0).contains(&s.angle_deg));
        }
    }

    #[test]
    fn negative_rate_stays_in_range_over_many_frames() {
        let mut s = Spin::new(-45.0);
        for dt in [0.016, 1e-7, 0.033, 1e-9] {
            for _ in 0..10_000 {
                s.advance(dt);
                assert!((0.0..360.0).contains(&s.angle_deg), "dt={dt}: {}", s.angle_deg);
            }
        }
    }
}
