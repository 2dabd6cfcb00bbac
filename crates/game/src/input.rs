//! Player input handling.
//!
//! Converts raw key states into the directional axes and jump edges the
//! player motivator consumes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Directional key states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Raw player input for a single tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Directional keys held this tick.
    pub movement: MovementKeys,

    /// Jump key went down this tick (edge, not level).
    pub jump_pressed: bool,

    /// Jump key came up this tick (edge, not level).
    pub jump_released: bool,
}

impl PlayerInput {
    /// Directional axes in [-1, 1]. Down input (`y == -1`) doubles as the
    /// drop-through request for one-way platforms.
    pub fn axes(&self) -> Vec2 {
        let x = (self.movement.right as i8 - self.movement.left as i8) as f32;
        let y = (self.movement.up as i8 - self.movement.down as i8) as f32;
        Vec2::new(x, y)
    }

    /// Check if any directional input is active.
    pub fn has_movement(&self) -> bool {
        self.movement.left || self.movement.right || self.movement.up || self.movement.down
    }
}
