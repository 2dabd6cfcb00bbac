//! Per-tick collision state for a kinematic body.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How long a body ignores pass-through surfaces after dropping through
/// one, in seconds.
pub const DROP_THROUGH_GRACE: f32 = 0.25;

/// The authoritative contact record for one body.
///
/// Reset at the start of every move call and rebuilt by the sweeps during
/// that call; the motivator reads it afterwards to decide when to zero
/// vertical velocity, jump, or wall-slide. Only `face_dir`, the slope-angle
/// history, and the drop-through timer survive across ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionState {
    /// Contact against the underside of something this tick.
    pub above: bool,
    /// Grounded this tick.
    pub below: bool,
    pub left: bool,
    pub right: bool,

    pub climbing_slope: bool,
    pub descending_slope: bool,
    pub sliding_down_max_slope: bool,

    /// Angle of the currently engaged slope, radians from vertical-up.
    pub slope_angle: f32,
    /// Slope angle the previous tick ended with; used to detect that a
    /// newly hit surface is a different slope.
    pub previous_slope_angle: f32,
    /// Surface normal of the currently engaged slope.
    pub slope_normal: Vec2,

    /// Displacement requested before slope pre-processing altered it.
    /// Needed to cancel an erroneous descend-then-climb transition.
    pub move_amount_old: Vec2,

    /// Last nonzero horizontal movement direction, `1.0` or `-1.0`.
    pub face_dir: f32,

    /// Pass-through surfaces are ignored until this simulation time.
    pub drop_through_until: f32,
}

impl Default for CollisionState {
    fn default() -> Self {
        Self {
            above: false,
            below: false,
            left: false,
            right: false,
            climbing_slope: false,
            descending_slope: false,
            sliding_down_max_slope: false,
            slope_angle: 0.0,
            previous_slope_angle: 0.0,
            slope_normal: Vec2::ZERO,
            move_amount_old: Vec2::ZERO,
            face_dir: 1.0,
            drop_through_until: f32::NEG_INFINITY,
        }
    }
}

impl CollisionState {
    /// Reset for a new move call: `previous = current; current = default`.
    ///
    /// Flags clear, the slope angle shifts into `previous_slope_angle`, and
    /// `face_dir` plus the drop-through timer carry over.
    pub fn begin_tick(&mut self) {
        self.above = false;
        self.below = false;
        self.left = false;
        self.right = false;
        self.climbing_slope = false;
        self.descending_slope = false;
        self.sliding_down_max_slope = false;
        self.slope_normal = Vec2::ZERO;

        self.previous_slope_angle = self.slope_angle;
        self.slope_angle = 0.0;
    }

    /// Whether the post-drop grace window is still open.
    #[inline]
    pub fn dropping_through(&self, now: f32) -> bool {
        now < self.drop_through_until
    }

    /// Open the grace window: pass-through surfaces stop colliding until
    /// [`DROP_THROUGH_GRACE`] seconds from `now`.
    pub fn arm_drop_through(&mut self, now: f32) {
        self.drop_through_until = now + DROP_THROUGH_GRACE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_tick_shifts_slope_angle() {
        let mut state = CollisionState::default();
        state.slope_angle = 0.3;
        state.below = true;
        state.climbing_slope = true;

        state.begin_tick();

        assert_eq!(state.previous_slope_angle, 0.3);
        assert_eq!(state.slope_angle, 0.0);
        assert!(!state.below);
        assert!(!state.climbing_slope);
    }

    #[test]
    fn test_begin_tick_preserves_face_dir() {
        let mut state = CollisionState::default();
        state.face_dir = -1.0;
        state.begin_tick();
        assert_eq!(state.face_dir, -1.0);
    }

    #[test]
    fn test_drop_through_window() {
        let mut state = CollisionState::default();
        assert!(!state.dropping_through(0.0));

        state.arm_drop_through(1.0);
        assert!(state.dropping_through(1.0));
        assert!(state.dropping_through(1.0 + DROP_THROUGH_GRACE - 0.01));
        assert!(!state.dropping_through(1.0 + DROP_THROUGH_GRACE));
    }
}
