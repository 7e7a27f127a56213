use crate::coords::Vec2;

use super::axis::{accelerate_axis, AxisInput, AxisParams};

/// An entity moved by explicit acceleration rules.
///
/// After every `integrate` call each velocity component satisfies
/// `|v| <= top_speed * dt`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: f32,
    pub deceleration: f32,
    pub top_speed: f32,
}

impl KinematicBody {
    /// Creates a body at rest at `position`.
    pub fn new(position: Vec2, acceleration: f32, deceleration: f32, top_speed: f32) -> Self {
        Self {
            position,
            velocity: Vec2::zero(),
            acceleration,
            deceleration,
            top_speed,
        }
    }

    #[inline]
    pub fn params(&self) -> AxisParams {
        AxisParams {
            acceleration: self.acceleration,
            deceleration: self.deceleration,
            top_speed: self.top_speed,
        }
    }

    /// Speed cap in effect for a frame of `dt` seconds.
    #[inline]
    pub fn speed_cap(&self, dt: f64) -> f32 {
        self.params().cap(dt)
    }

    /// Advances the body by one frame. Axes are independent.
    pub fn integrate(&mut self, x: AxisInput, y: AxisInput, dt: f64) {
        let params = self.params();
        self.velocity.x = accelerate_axis(self.velocity.x, x, &params, dt);
        self.velocity.y = accelerate_axis(self.velocity.y, y, &params, dt);
        self.position.x = advance(self.position.x, self.velocity.x, dt);
        self.position.y = advance(self.position.y, self.velocity.y, dt);
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.velocity.x == 0.0 && self.velocity.y == 0.0
    }
}

#[inline]
fn advance(position: f32, velocity: f32, dt: f64) -> f32 {
    (f64::from(position) + f64::from(velocity) * dt) as f32
}
