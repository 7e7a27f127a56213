use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Handle to a texture registered with the image renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// Textured quad payload.
///
/// The texture is stretched over `rect` and multiplied by `tint`
/// (premultiplied, so `tint.a` also fades the image).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub rect: Rect,
    pub texture: TextureId,
    pub tint: Color,
}

impl DrawList {
    /// Records a textured quad. Empty rectangles are dropped.
    pub fn push_image(&mut self, z: ZIndex, rect: Rect, texture: TextureId, tint: Color) {
        if rect.is_empty() {
            return;
        }
        self.push(z, DrawCmd::Image(ImageCmd { rect, texture, tint }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rect_is_dropped() {
        let mut list = DrawList::new();
        list.push_image(ZIndex(0), Rect::new(0.0, 0.0, 0.0, 10.0), TextureId(1), Color::white());
        assert!(list.items().is_empty());

        list.push_image(ZIndex(0), Rect::new(0.0, 0.0, 4.0, 10.0), TextureId(1), Color::white());
        assert_eq!(list.items().len(), 1);
    }
}
