use super::Vec2;

/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis for converting logical px
/// positions to NDC in shaders. It also maps normalized world coordinates
/// (`[-1, 1]` on both axes, +Y up) onto the window (+Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a world point to logical pixels.
    #[inline]
    pub fn world_to_px(self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x + 1.0) * 0.5 * self.width,
            (1.0 - p.y) * 0.5 * self.height,
        )
    }

    /// Maps a world-space length using the shorter axis, so circles stay round.
    #[inline]
    pub fn world_len_to_px(self, len: f32) -> f32 {
        len * 0.5 * self.width.min(self.height)
    }

    /// Size of a world-space extent in logical pixels, per axis.
    #[inline]
    pub fn world_size_to_px(self, size: Vec2) -> Vec2 {
        Vec2::new(size.x * 0.5 * self.width, size.y * 0.5 * self.height)
    }
}
