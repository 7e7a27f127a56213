//! Frame-rate-independent kinematics.
//!
//! State is `f32`; the frame delta time is `f64` seconds. Products with the
//! delta are formed in `f64` and rounded when stored. Two policies share the
//! same time base:
//! - constant speed (`walk`): position moves while a direction is held
//! - accelerated (`accelerate_axis` / `KinematicBody`): velocity ramps up
//!   while held, decays to exactly zero when released, and is capped

mod axis;
mod body;
mod scalar;
mod spin;

pub use axis::{accelerate_axis, walk, AxisBinding, AxisInput, AxisParams};
pub use body::KinematicBody;
pub use scalar::{clamp, sign};
pub use spin::Spin;
