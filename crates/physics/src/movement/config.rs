//! Per-body movement configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::Layers;

/// Configuration problems detected when a body or platform is created.
///
/// All variants are construction-time failures; the tick loop itself never
/// errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Ray spacing would divide by zero: the box is too small relative to
    /// the configured maximum gap between adjacent rays.
    #[error("{axis} ray count resolved to {count}, need at least 2 (box too small for max_ray_gap)")]
    TooFewRays { axis: &'static str, count: u32 },

    /// A waypoint path needs at least two waypoints.
    #[error("waypoint path has {0} waypoints, need at least 2")]
    TooFewWaypoints(usize),

    /// Two adjacent waypoints coincide, which would make segment traversal
    /// divide by zero.
    #[error("waypoints {0} and {1} coincide")]
    ZeroLengthSegment(usize, usize),

    /// Platform speed must be positive.
    #[error("platform speed must be positive, got {0}")]
    NonPositiveSpeed(f32),
}

/// Configuration for a kinematic body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Inset applied to the bounding box before rays are cast, so rays
    /// never start exactly on a surface the body is resting against.
    pub skin_width: f32,

    /// Maximum distance between adjacent rays; ray counts derive from the
    /// box dimensions divided by this.
    pub max_ray_gap: f32,

    /// Steepest slope the body can climb or descend, in degrees from flat.
    pub max_slope_angle_deg: f32,

    /// Layer the body's own brush occupies (what platforms scan for).
    pub layer: Layers,

    /// Layers the body's sweeps collide with.
    pub collision_mask: Layers,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            skin_width: 0.015,
            max_ray_gap: 0.25,
            max_slope_angle_deg: 10.0,
            layer: Layers::PASSENGER,
            collision_mask: Layers::SOLID,
        }
    }
}

impl BodyConfig {
    /// Maximum climbable slope angle in radians.
    #[inline]
    pub fn max_slope_angle(&self) -> f32 {
        self.max_slope_angle_deg.to_radians()
    }
}
