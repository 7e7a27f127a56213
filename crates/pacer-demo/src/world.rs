use pacer_engine::coords::Vec2;
use pacer_engine::input::{ButtonId, InputState};
use pacer_engine::motion::{walk, AxisBinding, AxisInput, KinematicBody, Spin};

use crate::config::Tuning;

/// The rotating teapot: spins in place and moves along the view axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Teapot {
    pub spin: Spin,
    /// Depth; positive is toward the viewer.
    pub z: f32,
}

/// Everything that moves. World units span `[-1, 1]` on both axes, +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub sprite: Vec2,
    pub ball: KinematicBody,
    pub teapot: Teapot,
    /// Directional light `[x, y, z, w]`, kept on the ball.
    pub light: [f32; 4],
    walk_speed: f32,
}

/// Depth control for the teapot: Action2 pulls it closer, Action1 pushes it away.
const DEPTH: AxisBinding = AxisBinding::new(ButtonId::Action2, ButtonId::Action1);

impl World {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            sprite: Vec2::zero(),
            ball: KinematicBody::new(
                Vec2::zero(),
                tuning.acceleration,
                tuning.deceleration,
                tuning.top_speed,
            ),
            teapot: Teapot {
                spin: Spin::new(tuning.spin_rate),
                z: 0.0,
            },
            light: [0.0, 0.0, -1.0, 0.0],
            walk_speed: tuning.walk_speed,
        }
    }

    /// Advances every object by `dt` seconds under the current input.
    pub fn update(&mut self, input: &InputState, dt: f64) {
        let x = AxisBinding::HORIZONTAL.read(input);
        let y = AxisBinding::VERTICAL.read(input);

        self.sprite.x = walk(self.sprite.x, x, self.walk_speed, dt);
        self.sprite.y = walk(self.sprite.y, y, self.walk_speed, dt);

        self.ball.integrate(x, y, dt);
        self.light = [self.ball.position.x, self.ball.position.y, -1.0, 0.0];

        self.teapot.spin.advance(dt);
        let depth: AxisInput = DEPTH.read(input);
        self.teapot.z = walk(self.teapot.z, depth, self.walk_speed, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.016;

    fn world() -> World {
        World::new(&Tuning::default())
    }

    fn holding(buttons: &[ButtonId]) -> InputState {
        let mut input = InputState::new();
        for &b in buttons {
            input.set_button(b, true);
        }
        input
    }

    #[test]
    fn idle_frame_only_spins() {
        let mut w = world();
        w.update(&InputState::new(), DT);
        assert_eq!(w.sprite, Vec2::zero());
        assert!(w.ball.is_at_rest());
        assert_eq!(w.teapot.z, 0.0);
        assert!((f64::from(w.teapot.spin.angle_deg) - 45.0 * DT).abs() < 1e-5);
    }

    #[test]
    fn sprite_walks_diagonally() {
        let mut w = world();
        w.update(&holding(&[ButtonId::Up, ButtonId::Right]), DT);
        assert!((w.sprite.x - 0.008).abs() < 1e-6);
        assert!((w.sprite.y - 0.008).abs() < 1e-6);
    }

    #[test]
    fn opposing_keys_cancel_for_sprite() {
        let mut w = world();
        w.update(&holding(&[ButtonId::Left, ButtonId::Right]), DT);
        assert_eq!(w.sprite.x, 0.0);
    }

    #[test]
    fn ball_accelerates_and_light_follows() {
        let mut w = world();
        let input = holding(&[ButtonId::Right]);
        for _ in 0..5 {
            w.update(&input, DT);
        }
        assert!(w.ball.velocity.x > 0.0);
        assert_eq!(w.ball.velocity.y, 0.0);
        assert_eq!(
            w.light,
            [w.ball.position.x, w.ball.position.y, -1.0, 0.0]
        );
    }

    #[test]
    fn teapot_depth_follows_actions() {
        let mut w = world();
        w.update(&holding(&[ButtonId::Action2]), DT);
        assert!((w.teapot.z - 0.008).abs() < 1e-6);

        w.update(&holding(&[ButtonId::Action1]), DT);
        w.update(&holding(&[ButtonId::Action1]), DT);
        assert!((w.teapot.z + 0.008).abs() < 1e-6);
    }

    #[test]
    fn start_button_moves_nothing() {
        let mut w = world();
        w.update(&holding(&[ButtonId::Start]), DT);
        assert_eq!(w.sprite, Vec2::zero());
        assert!(w.ball.is_at_rest());
    }
}
