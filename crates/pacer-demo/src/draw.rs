//! Projects the world into a draw list.
//!
//! The teapot is a flat stand-in: a shaded disc whose apparent size follows
//! its depth, with a spout marker orbiting on the spin axis (drawn behind the
//! body while it faces away) and a highlight pointing at the light.

use pacer_engine::coords::{Rect, Vec2, Viewport};
use pacer_engine::paint::Color;
use pacer_engine::scene::shapes::image::TextureId;
use pacer_engine::scene::{DrawList, ZIndex};

use crate::palette::ColorCycle;
use crate::world::World;

/// Sprite quad edge length, world units.
pub const SPRITE_SIZE: f32 = 1.0;
pub const BALL_RADIUS: f32 = 0.5;
pub const TEAPOT_RADIUS: f32 = 0.3;

const SPRITE_ALPHA: f32 = 0.2;
const BALL_ALPHA: f32 = 0.6;

const Z_SPRITE: ZIndex = ZIndex(0);
const Z_BALL: ZIndex = ZIndex(10);
const Z_SPOUT_BEHIND: ZIndex = ZIndex(20);
const Z_TEAPOT: ZIndex = ZIndex(21);
const Z_SPOUT_FRONT: ZIndex = ZIndex(22);
const Z_HIGHLIGHT: ZIndex = ZIndex(23);

/// Apparent scale of an object at depth `z`; the view sits 2 units out.
pub fn depth_scale(z: f32) -> f32 {
    let distance = (2.0 - z).max(0.25);
    2.0 / distance
}

/// Records the frame's draw commands into `list` (which is cleared first).
pub fn build_scene(
    list: &mut DrawList,
    world: &World,
    viewport: Viewport,
    colors: &ColorCycle,
    sprite: Option<TextureId>,
) {
    list.clear();

    if let Some(texture) = sprite {
        let rect = Rect::from_center_size(
            viewport.world_to_px(world.sprite),
            viewport.world_size_to_px(Vec2::new(SPRITE_SIZE, SPRITE_SIZE)),
        );
        list.push_image(Z_SPRITE, rect, texture, Color::white().with_alpha(SPRITE_ALPHA));
    }

    list.push_shaded_circle(
        Z_BALL,
        viewport.world_to_px(world.ball.position),
        viewport.world_len_to_px(BALL_RADIUS),
        colors.current(BALL_ALPHA),
        colors.next(BALL_ALPHA),
    );

    push_teapot(list, world, viewport);
}

fn push_teapot(list: &mut DrawList, world: &World, viewport: Viewport) {
    let scale = depth_scale(world.teapot.z);
    let radius = TEAPOT_RADIUS * scale;
    let center = Vec2::zero();

    let lit = Color::from_straight(1.0, 1.0, 1.0, 1.0);
    let shade = Color::from_straight(0.35, 0.35, 0.4, 1.0);
    let (left, right) = if world.light[0] >= center.x { (shade, lit) } else { (lit, shade) };

    list.push_shaded_circle(
        Z_TEAPOT,
        viewport.world_to_px(center),
        viewport.world_len_to_px(radius),
        left,
        right,
    );

    // Spout orbits around the vertical axis.
    let angle = world.teapot.spin.angle_rad();
    let spout = Vec2::new(center.x + radius * 1.3 * angle.cos(), center.y);
    let spout_z = if angle.sin() < 0.0 { Z_SPOUT_BEHIND } else { Z_SPOUT_FRONT };
    list.push_solid_circle(
        spout_z,
        viewport.world_to_px(spout),
        viewport.world_len_to_px(radius * 0.25),
        Color::from_straight(0.8, 0.8, 0.85, 1.0),
    );

    let to_light = Vec2::new(world.light[0], world.light[1]) - center;
    let len = (to_light.x * to_light.x + to_light.y * to_light.y).sqrt();
    let offset = if len > f32::EPSILON { to_light * (radius * 0.5 / len) } else { Vec2::zero() };
    list.push_solid_circle(
        Z_HIGHLIGHT,
        viewport.world_to_px(center + offset),
        viewport.world_len_to_px(radius * 0.2),
        Color::white().with_alpha(0.6),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use pacer_engine::scene::DrawCmd;

    fn viewport() -> Viewport {
        Viewport::new(500.0, 500.0)
    }

    #[test]
    fn depth_scale_grows_toward_viewer() {
        assert_eq!(depth_scale(0.0), 1.0);
        assert!(depth_scale(0.5) > 1.0);
        assert!(depth_scale(-0.5) < 1.0);
        assert!(depth_scale(100.0).is_finite());
    }

    #[test]
    fn without_sprite_only_circles_are_drawn() {
        let mut list = DrawList::new();
        let world = World::new(&Tuning::default());
        build_scene(&mut list, &world, viewport(), &ColorCycle::new(), None);

        assert_eq!(list.items().len(), 4);
        assert!(list.items().iter().all(|i| matches!(i.cmd, DrawCmd::Circle(_))));
    }

    #[test]
    fn sprite_quad_is_centered_on_sprite() {
        let mut list = DrawList::new();
        let mut world = World::new(&Tuning::default());
        world.sprite = Vec2::new(0.5, 0.5);
        build_scene(&mut list, &world, viewport(), &ColorCycle::new(), Some(TextureId(3)));

        let DrawCmd::Image(img) = &list.items()[0].cmd else { panic!("sprite first") };
        assert_eq!(img.texture, TextureId(3));
        assert_eq!(img.rect.center(), Vec2::new(375.0, 125.0));
        assert_eq!(img.rect.size, Vec2::new(250.0, 250.0));
        assert!((img.tint.a - SPRITE_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn ball_is_drawn_at_its_position() {
        let mut list = DrawList::new();
        let mut world = World::new(&Tuning::default());
        world.ball.position = Vec2::new(-1.0, 0.0);
        build_scene(&mut list, &world, viewport(), &ColorCycle::new(), None);

        let DrawCmd::Circle(ball) = &list.items()[0].cmd else { panic!("ball first") };
        assert_eq!(ball.center, Vec2::new(0.0, 250.0));
        assert_eq!(ball.radius, 125.0);
    }

    #[test]
    fn spout_passes_behind_body_half_the_turn() {
        let mut world = World::new(&Tuning::default());
        let spout_z = |world: &World| {
            let mut list = DrawList::new();
            build_scene(&mut list, world, viewport(), &ColorCycle::new(), None);
            list.items()[2].key.z
        };

        world.teapot.spin.angle_deg = 90.0;
        assert_eq!(spout_z(&world), Z_SPOUT_FRONT);

        world.teapot.spin.angle_deg = 270.0;
        assert_eq!(spout_z(&world), Z_SPOUT_BEHIND);
    }
}
