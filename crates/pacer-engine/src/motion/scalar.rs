/// Sign used for decay direction: `-1.0` for negative values, `1.0` otherwise.
///
/// Zero maps to `1.0`. A body at rest therefore receives a tiny negative
/// adjustment each idle tick, which the zero-snap in `accelerate_axis`
/// removes again.
#[inline]
pub fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Limits `v` to `[min, max]`.
///
/// Unlike `f32::clamp` this never panics on an inverted range.
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}
