//! Player motion integration: horizontal drive, gravity, ground detection.
//!
//! Plain property mutation, no algorithmic content: velocity is driven
//! directly from the stored axis, gravity scales up while falling, and a
//! small probe box under the feet refills the jump counter.

use core::time::Duration;

use super::{GameEngine, JumpInput};
use crate::config::{InteractConfig, MotionConfig};
use crate::state::{Facing, LayerMask};

impl GameEngine<'_> {
    /// Edge-triggered jump input. A press launches at full power; a release
    /// while still rising cuts the jump short. Both consume a jump.
    pub fn jump(&mut self, input: JumpInput) {
        let cfg = &self.config.motion;
        let player = &mut self.state.entities.player;
        if player.jumps_remaining == 0 {
            return;
        }
        match input {
            JumpInput::Pressed => {
                player.velocity.y = cfg.jump_power;
                player.jumps_remaining -= 1;
            }
            JumpInput::Released => {
                if player.velocity.y > 0.0 {
                    player.velocity.y *= 0.5;
                    player.jumps_remaining -= 1;
                }
            }
        }
    }

    pub(super) fn integrate_motion(&mut self, dt: Duration) {
        let cfg = &self.config.motion;
        let dt = dt.as_secs_f32();

        let player = &mut self.state.entities.player;
        if let Some(facing) = Facing::from_axis(player.move_axis, InteractConfig::FACING_DEAD_ZONE)
        {
            player.facing = facing;
        }
        player.velocity.x = player.move_axis * cfg.move_speed;

        // Fall faster than you rise, up to the clamp.
        let gravity_scale = if player.velocity.y < 0.0 {
            cfg.base_gravity * cfg.fall_gravity_mult
        } else {
            cfg.base_gravity
        };
        player.velocity.y -= MotionConfig::GRAVITY * gravity_scale * dt;
        player.velocity.y = player.velocity.y.max(-cfg.max_fall_speed);

        player.position += player.velocity * dt;

        let probe_center = self.state.entities.player.position + cfg.ground_probe_offset;
        let grounded = self.state.entities.props.iter().any(|prop| {
            prop.layers.intersects(LayerMask::GROUND)
                && prop
                    .collider
                    .overlaps_aabb(prop.position, probe_center, cfg.ground_probe_half)
        });

        let player = &mut self.state.entities.player;
        player.grounded = grounded;
        if grounded {
            player.jumps_remaining = cfg.max_jumps;
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use glam::Vec2;

    use super::super::{GameEngine, JumpInput};
    use crate::config::GameConfig;
    use crate::spatial::Collider;
    use crate::state::{EntityId, Facing, GameState, LayerMask, PropState};

    const DT: Duration = Duration::from_millis(50);

    fn with_ground() -> GameState {
        GameState::builder()
            .prop(PropState::new(
                EntityId(1),
                Vec2::new(0.0, -0.55),
                Collider::aabb(5.0, 0.05),
                LayerMask::GROUND,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn axis_drives_horizontal_velocity_and_facing() {
        let mut state = with_ground();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        engine.set_move_axis(-1.0);
        engine.step(DT);

        let player = &engine.state().entities.player;
        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.velocity.x, -5.0);
        assert!(player.position.x < 0.0);
    }

    #[test]
    fn facing_survives_noise_inside_dead_zone() {
        let mut state = with_ground();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        engine.set_move_axis(1.0);
        engine.step(DT);
        assert_eq!(engine.state().entities.player.facing, Facing::Right);

        // Noise near zero must not flip or reset facing.
        engine.set_move_axis(0.005);
        engine.step(DT);
        assert_eq!(engine.state().entities.player.facing, Facing::Right);

        engine.set_move_axis(-0.009);
        engine.step(DT);
        assert_eq!(engine.state().entities.player.facing, Facing::Right);
    }

    #[test]
    fn ground_probe_refills_jumps() {
        let mut state = with_ground();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        assert_eq!(engine.state().entities.player.jumps_remaining, 0);
        engine.step(DT);
        assert!(engine.state().entities.player.grounded);
        assert_eq!(engine.state().entities.player.jumps_remaining, 2);
    }

    #[test]
    fn jump_press_and_release_consume_jumps() {
        let mut state = with_ground();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);
        engine.step(DT); // grounded, jumps refilled

        engine.jump(JumpInput::Pressed);
        assert_eq!(engine.state().entities.player.velocity.y, 10.0);
        assert_eq!(engine.state().entities.player.jumps_remaining, 1);

        // Releasing while rising halves the ascent.
        engine.jump(JumpInput::Released);
        assert_eq!(engine.state().entities.player.velocity.y, 5.0);
        assert_eq!(engine.state().entities.player.jumps_remaining, 0);

        // Out of jumps: further presses are ignored.
        engine.jump(JumpInput::Pressed);
        assert_eq!(engine.state().entities.player.velocity.y, 5.0);
    }

    #[test]
    fn fall_speed_is_clamped() {
        let mut state = GameState::builder().build().unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        // No ground anywhere: free fall for two simulated seconds.
        for _ in 0..40 {
            engine.step(DT);
        }
        assert_eq!(engine.state().entities.player.velocity.y, -18.0);
        assert!(!engine.state().entities.player.grounded);
    }
}
