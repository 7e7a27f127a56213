use crate::input::{ButtonId, InputState};

use super::scalar::{clamp, sign};

/// Directional drive for one axis.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct AxisInput {
    pub positive: bool,
    pub negative: bool,
}

impl AxisInput {
    pub const IDLE: AxisInput = AxisInput { positive: false, negative: false };

    #[inline]
    pub const fn new(positive: bool, negative: bool) -> Self {
        Self { positive, negative }
    }

    /// True when neither direction is held.
    #[inline]
    pub fn is_idle(self) -> bool {
        !self.positive && !self.negative
    }
}

/// Pair of buttons driving one axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AxisBinding {
    pub positive: ButtonId,
    pub negative: ButtonId,
}

impl AxisBinding {
    /// Right is positive x.
    pub const HORIZONTAL: AxisBinding = AxisBinding::new(ButtonId::Right, ButtonId::Left);
    /// Up is positive y.
    pub const VERTICAL: AxisBinding = AxisBinding::new(ButtonId::Up, ButtonId::Down);

    #[inline]
    pub const fn new(positive: ButtonId, negative: ButtonId) -> Self {
        Self { positive, negative }
    }

    #[inline]
    pub fn read(self, input: &InputState) -> AxisInput {
        AxisInput::new(input.is_held(self.positive), input.is_held(self.negative))
    }
}

/// Acceleration model for one axis.
///
/// `deceleration` is expected not to exceed `acceleration`; otherwise the
/// idle decay can step over zero before the snap threshold catches it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisParams {
    /// Velocity gained per second while a direction is held.
    pub acceleration: f32,
    /// Velocity lost per second while idle.
    pub deceleration: f32,
    /// Speed cap. Scaled by `dt` before clamping.
    pub top_speed: f32,
}

impl AxisParams {
    /// Speed cap for a frame of `dt` seconds, rounded to `f32`.
    #[inline]
    pub fn cap(&self, dt: f64) -> f32 {
        (f64::from(self.top_speed) * dt) as f32
    }
}

/// Moves `position` at a constant `speed` per second.
///
/// The step is computed in `f64` and rounded once; the additions are `f32`.
/// Both directions are checked independently: opposing keys cancel out.
#[inline]
pub fn walk(position: f32, input: AxisInput, speed: f32, dt: f64) -> f32 {
    let step = (f64::from(speed) * dt) as f32;
    let mut p = position;
    if input.positive {
        p += step;
    }
    if input.negative {
        p -= step;
    }
    p
}

/// Advances one axis' velocity by a frame of `dt` seconds.
///
/// - held directions add or subtract `acceleration * dt`
/// - with no direction held, velocity decays by `deceleration * dt` toward
///   zero and snaps to exactly zero once its magnitude is within
///   `acceleration * dt`
/// - the result is clamped to `±top_speed * dt`
///
/// Products with `dt` and the snap comparison run in `f64`; every store
/// rounds back to `f32`.
///
/// The cap scales with `dt`, so at higher frame rates the ball tops out
/// slower. Existing tuning depends on that behavior.
pub fn accelerate_axis(velocity: f32, input: AxisInput, params: &AxisParams, dt: f64) -> f32 {
    let accel_step = f64::from(params.acceleration) * dt;
    let mut v = velocity;

    if input.positive {
        v = (f64::from(v) + accel_step) as f32;
    }
    if input.negative {
        v = (f64::from(v) - accel_step) as f32;
    }
    if input.is_idle() {
        let decay = f64::from(params.deceleration * sign(v)) * dt;
        v = (f64::from(v) - decay) as f32;
        if f64::from(v.abs()) <= accel_step {
            v = 0.0;
        }
    }

    let cap = params.cap(dt);
    clamp(v, -cap, cap)
}
