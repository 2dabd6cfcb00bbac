//! The player motivator.
//!
//! Turns directional input and gravity into the per-tick displacement the
//! motion resolver consumes, and reads the resulting collision state back
//! to manage vertical velocity, variable-height jumps, and wall sliding.

use bramble_physics::{CollisionState, CollisionWorld, KinematicBody, PassengerId};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tuning for player movement feel.
///
/// Jumping is expressed in terms the designer cares about (heights and the
/// time to reach the apex); gravity and jump velocities derive from them at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Jump height when the button is held, in units.
    pub max_jump_height: f32,
    /// Jump height when the button is released immediately.
    pub min_jump_height: f32,
    /// Seconds to reach the top of a full jump.
    pub time_to_jump_apex: f32,

    /// Horizontal smoothing time while airborne, seconds.
    pub accel_time_airborne: f32,
    /// Horizontal smoothing time while grounded, seconds.
    pub accel_time_grounded: f32,
    /// Top horizontal speed, units per second.
    pub move_speed: f32,

    /// Wall-jump velocity when jumping toward the wall being slid.
    pub wall_jump_climb: Vec2,
    /// Wall-jump velocity with no horizontal input (drop off the wall).
    pub wall_jump_off: Vec2,
    /// Wall-jump velocity when jumping away from the wall.
    pub wall_leap: Vec2,
    /// Fall speed cap while wall sliding.
    pub wall_slide_speed_max: f32,
    /// Grace period the player sticks to a wall while pushing away,
    /// leaving time to perform a leap.
    pub wall_stick_time: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_jump_height: 4.0,
            min_jump_height: 1.0,
            time_to_jump_apex: 0.4,
            accel_time_airborne: 0.1,
            accel_time_grounded: 0.05,
            move_speed: 6.0,
            wall_jump_climb: Vec2::new(7.5, 16.0),
            wall_jump_off: Vec2::new(8.5, 7.0),
            wall_leap: Vec2::new(18.0, 17.0),
            wall_slide_speed_max: 3.0,
            wall_stick_time: 0.25,
        }
    }
}

/// A player: a kinematic body plus the velocity model that drives it.
#[derive(Debug)]
pub struct Player {
    pub id: PassengerId,
    pub body: KinematicBody,
    tuning: PlayerTuning,

    // Derived from tuning at construction.
    gravity: f32,
    max_jump_velocity: f32,
    min_jump_velocity: f32,

    velocity: Vec2,
    velocity_x_smoothing: f32,
    directional_input: Vec2,
    wall_sliding: bool,
    wall_dir_x: f32,
    time_to_wall_unstick: f32,
}

impl Player {
    pub fn new(id: PassengerId, body: KinematicBody, tuning: PlayerTuning) -> Self {
        // Solve projectile motion for the configured jump: from
        // h = g t^2 / 2 at the apex, g = 2h / t^2.
        let gravity = -(2.0 * tuning.max_jump_height) / tuning.time_to_jump_apex.powi(2);
        let max_jump_velocity = gravity.abs() * tuning.time_to_jump_apex;
        let min_jump_velocity = (2.0 * gravity.abs() * tuning.min_jump_height).sqrt();

        log::debug!("player {id:?}: gravity {gravity:.2}, jump velocity {max_jump_velocity:.2}");

        Self {
            id,
            body,
            tuning,
            gravity,
            max_jump_velocity,
            min_jump_velocity,
            velocity: Vec2::ZERO,
            velocity_x_smoothing: 0.0,
            directional_input: Vec2::ZERO,
            wall_sliding: false,
            wall_dir_x: 1.0,
            time_to_wall_unstick: 0.0,
        }
    }

    /// Current velocity in units per second.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// Contact state from the body's most recent move.
    #[inline]
    pub fn collision_state(&self) -> &CollisionState {
        self.body.state()
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.body.state().below
    }

    #[inline]
    pub fn is_wall_sliding(&self) -> bool {
        self.wall_sliding
    }

    /// Set the directional axes for the coming ticks.
    pub fn set_directional_input(&mut self, input: Vec2) {
        self.directional_input = input;
    }

    /// Jump key edge: grounded jump, slope jump, or one of the three
    /// wall-jump responses while sliding.
    pub fn on_jump_pressed(&mut self) {
        if self.wall_sliding {
            if self.wall_dir_x == self.directional_input.x {
                // Pushing into the wall: hop up along it.
                self.velocity.x = -self.wall_dir_x * self.tuning.wall_jump_climb.x;
                self.velocity.y = self.tuning.wall_jump_climb.y;
            } else if self.directional_input.x == 0.0 {
                // Neutral: drop off the wall.
                self.velocity.x = -self.wall_dir_x * self.tuning.wall_jump_off.x;
                self.velocity.y = self.tuning.wall_jump_off.y;
            } else {
                // Pushing away: leap toward the opposite wall.
                self.velocity.x = -self.wall_dir_x * self.tuning.wall_leap.x;
                self.velocity.y = self.tuning.wall_leap.y;
            }
        }

        let state = *self.body.state();
        if state.below {
            if state.sliding_down_max_slope {
                // Jumping while sliding only works away from the slope;
                // the impulse leaves along the surface normal.
                if self.directional_input.x != -state.slope_normal.x.signum() {
                    self.velocity.y = self.max_jump_velocity * state.slope_normal.y;
                    self.velocity.x = self.max_jump_velocity * state.slope_normal.x;
                }
            } else {
                self.velocity.y = self.max_jump_velocity;
            }
        }
    }

    /// Jump key released: clamp to the minimum jump for variable height.
    pub fn on_jump_released(&mut self) {
        if self.velocity.y > self.min_jump_velocity {
            self.velocity.y = self.min_jump_velocity;
        }
    }

    /// Advance the player one tick.
    pub fn update(&mut self, world: &mut CollisionWorld, dt: f32, now: f32) {
        self.calculate_velocity(dt);
        self.handle_wall_sliding(dt);

        self.body
            .move_by(world, self.velocity * dt, self.directional_input, false, now);

        let state = self.body.state();
        if state.above || state.below {
            if state.sliding_down_max_slope {
                // The slope angle feeds back into the fall speed: steeper
                // surfaces slide faster.
                self.velocity.y += state.slope_normal.y * -self.gravity * dt;
            } else {
                self.velocity.y = 0.0;
            }
        }
    }

    fn calculate_velocity(&mut self, dt: f32) {
        let target_velocity_x = self.directional_input.x * self.tuning.move_speed;
        let smooth_time = if self.body.state().below {
            self.tuning.accel_time_grounded
        } else {
            self.tuning.accel_time_airborne
        };
        self.velocity.x = smooth_damp(
            self.velocity.x,
            target_velocity_x,
            &mut self.velocity_x_smoothing,
            smooth_time,
            dt,
        );
        self.velocity.y += self.gravity * dt;
    }

    fn handle_wall_sliding(&mut self, dt: f32) {
        let state = *self.body.state();
        self.wall_dir_x = if state.left { -1.0 } else { 1.0 };
        self.wall_sliding = false;

        if (state.left || state.right) && !state.below && self.velocity.y < 0.0 {
            self.wall_sliding = true;

            if self.velocity.y < -self.tuning.wall_slide_speed_max {
                self.velocity.y = -self.tuning.wall_slide_speed_max;
            }

            if self.time_to_wall_unstick > 0.0 {
                self.velocity.x = 0.0;
                self.velocity_x_smoothing = 0.0;

                if self.directional_input.x != self.wall_dir_x && self.directional_input.x != 0.0 {
                    self.time_to_wall_unstick -= dt;
                } else {
                    self.time_to_wall_unstick = self.tuning.wall_stick_time;
                }
            } else {
                self.time_to_wall_unstick = self.tuning.wall_stick_time;
            }
        }
    }
}

/// Critically damped smoothing of `current` toward `target`.
///
/// `velocity` carries the smoothing rate between calls; `smooth_time` is
/// roughly the time to cover most of the remaining distance. Stable for
/// any `dt`.
fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;

    target + (change + temp) * exp
}

#[cfg(test)]
mod tests {
    use bramble_physics::{BodyConfig, Layers, Surface};

    use super::*;

    fn world_with_floor() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec2::new(0.0, -0.5),
            Vec2::new(50.0, 0.5),
            Layers::SOLID,
            Surface::Solid,
        );
        world
    }

    fn player_at(world: &mut CollisionWorld, x: f32, feet_y: f32) -> Player {
        let body = KinematicBody::new(
            world,
            Vec2::new(x, feet_y + 0.5),
            Vec2::new(0.35, 0.5),
            BodyConfig::default(),
        )
        .unwrap();
        Player::new(PassengerId(0), body, PlayerTuning::default())
    }

    fn settle(player: &mut Player, world: &mut CollisionWorld, now: &mut f32, ticks: usize) {
        for _ in 0..ticks {
            player.update(world, 1.0 / 60.0, *now);
            *now += 1.0 / 60.0;
        }
    }

    #[test]
    fn test_derived_jump_parameters() {
        let mut world = world_with_floor();
        let player = player_at(&mut world, 0.0, 0.0);

        // g = 2h / t^2 = 2 * 4 / 0.16 = 50, v = g * t = 20.
        assert!((player.gravity + 50.0).abs() < 1e-3);
        assert!((player.max_jump_velocity - 20.0).abs() < 1e-3);
        assert!(player.min_jump_velocity < player.max_jump_velocity);
    }

    #[test]
    fn test_gravity_settles_on_floor_and_velocity_resets() {
        let mut world = world_with_floor();
        let mut player = player_at(&mut world, 0.0, 1.0);
        let mut now = 0.0;

        settle(&mut player, &mut world, &mut now, 60);

        assert!(player.grounded());
        assert!(player.position().y - 0.5 < 1e-3, "feet on the floor");
        // Grounded ticks keep zeroing the accumulated gravity.
        assert_eq!(player.velocity().y, 0.0);
    }

    #[test]
    fn test_ground_jump_reaches_configured_height() {
        let mut world = world_with_floor();
        let mut player = player_at(&mut world, 0.0, 0.0);
        let mut now = 0.0;

        settle(&mut player, &mut world, &mut now, 5);
        assert!(player.grounded());

        player.on_jump_pressed();
        let mut peak = 0.0f32;
        for _ in 0..120 {
            player.update(&mut world, 1.0 / 60.0, now);
            now += 1.0 / 60.0;
            peak = peak.max(player.position().y - 0.5);
            if player.grounded() && player.velocity().y <= 0.0 {
                break;
            }
        }

        // Discrete integration overshoots the analytic height a little.
        assert!(peak > 3.5, "peak {peak}");
        assert!(peak < 4.6, "peak {peak}");
    }

    #[test]
    fn test_released_jump_is_shorter() {
        let mut world = world_with_floor();
        let mut now = 0.0;

        let mut full = player_at(&mut world, -5.0, 0.0);
        settle(&mut full, &mut world, &mut now, 5);
        full.on_jump_pressed();
        let mut full_peak = 0.0f32;
        for _ in 0..120 {
            full.update(&mut world, 1.0 / 60.0, now);
            full_peak = full_peak.max(full.position().y);
        }

        let mut short = player_at(&mut world, 5.0, 0.0);
        settle(&mut short, &mut world, &mut now, 5);
        short.on_jump_pressed();
        short.update(&mut world, 1.0 / 60.0, now);
        short.on_jump_released();
        let mut short_peak = 0.0f32;
        for _ in 0..120 {
            short.update(&mut world, 1.0 / 60.0, now);
            short_peak = short_peak.max(short.position().y);
        }

        assert!(short_peak < full_peak - 1.0, "{short_peak} vs {full_peak}");
    }

    #[test]
    fn test_wall_slide_caps_fall_speed() {
        let mut world = world_with_floor();
        // Tall wall to the right at x = 2.
        world.add_box(
            Vec2::new(2.5, 10.0),
            Vec2::new(0.5, 10.0),
            Layers::SOLID,
            Surface::Solid,
        );
        let mut player = player_at(&mut world, 1.5, 12.0);
        player.set_directional_input(Vec2::new(1.0, 0.0));
        let mut now = 0.0;

        let mut slid = false;
        for _ in 0..120 {
            player.update(&mut world, 1.0 / 60.0, now);
            now += 1.0 / 60.0;
            if player.is_wall_sliding() {
                slid = true;
                assert!(player.velocity().y >= -player.tuning.wall_slide_speed_max - 1e-3);
            }
            if player.grounded() {
                break;
            }
        }
        assert!(slid, "player should have wall-slid down the wall");
    }

    #[test]
    fn test_wall_jump_leap_clears_the_wall() {
        let mut world = world_with_floor();
        world.add_box(
            Vec2::new(2.5, 10.0),
            Vec2::new(0.5, 10.0),
            Layers::SOLID,
            Surface::Solid,
        );
        let mut player = player_at(&mut world, 1.5, 12.0);
        player.set_directional_input(Vec2::new(1.0, 0.0));
        let mut now = 0.0;

        // Fall until sliding, then leap away from the wall.
        for _ in 0..120 {
            player.update(&mut world, 1.0 / 60.0, now);
            now += 1.0 / 60.0;
            if player.is_wall_sliding() {
                break;
            }
        }
        assert!(player.is_wall_sliding());

        player.set_directional_input(Vec2::new(-1.0, 0.0));
        player.on_jump_pressed();

        assert!(player.velocity().x < 0.0, "leap pushes away from the wall");
        assert!(player.velocity().y > 0.0);
    }

    #[test]
    fn test_smooth_damp_converges() {
        let mut velocity = 0.0;
        let mut current = 0.0;
        for _ in 0..120 {
            current = smooth_damp(current, 6.0, &mut velocity, 0.1, 1.0 / 60.0);
        }
        assert!((current - 6.0).abs() < 0.05, "current {current}");
    }
}
