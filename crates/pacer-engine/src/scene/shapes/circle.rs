use crate::coords::Vec2;
use crate::paint::{Color, LinearGradient, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Circle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub paint: Paint,
}

impl DrawList {
    /// Records a circle draw command. Circles with a non-positive radius are dropped.
    pub fn push_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, paint: Paint) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        self.push(z, DrawCmd::Circle(CircleCmd { center, radius, paint }));
    }

    /// Records a solid circle.
    #[inline]
    pub fn push_solid_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push_circle(z, center, radius, Paint::Solid(color));
    }

    /// Records a circle shaded from `from` on its left edge to `to` on its right edge.
    pub fn push_shaded_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        from: Color,
        to: Color,
    ) {
        let gradient = LinearGradient::two_stop(
            Vec2::new(center.x - radius, center.y),
            Vec2::new(center.x + radius, center.y),
            from,
            to,
        );
        self.push_circle(z, center, radius, Paint::LinearGradient(gradient));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_radius_is_dropped() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 0.0, Color::white());
        list.push_solid_circle(ZIndex(0), Vec2::zero(), f32::NAN, Color::white());
        assert!(list.items().is_empty());
    }

    #[test]
    fn shaded_circle_spans_diameter() {
        let mut list = DrawList::new();
        list.push_shaded_circle(
            ZIndex(0),
            Vec2::new(10.0, 5.0),
            4.0,
            Color::white(),
            Color::black(),
        );
        let DrawCmd::Circle(cmd) = &list.items()[0].cmd else { panic!("not a circle") };
        let Paint::LinearGradient(g) = &cmd.paint else { panic!("not a gradient") };
        assert_eq!(g.start, Vec2::new(6.0, 5.0));
        assert_eq!(g.end, Vec2::new(14.0, 5.0));
        assert!(g.is_valid());
    }
}
