//! Ray origins and spacing derived from a bounding box.
//!
//! Both the kinematic body and the platform controller cast their rays from
//! the four corners of a skin-shrunk box; this module is the shared
//! geometry behind that. Origins are recomputed every tick from the current
//! box pose, spacing only when a box is created or resized.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::Aabb;

use super::config::ConfigError;

/// The four corner cast-origins of a skin-shrunk box.
#[derive(Debug, Clone, Copy)]
pub struct RayOrigins {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub top_right: Vec2,
}

/// Ray counts and the spacing between adjacent rays, per axis.
///
/// "Horizontal" rays are the sideways-facing ones stacked up the box's
/// height; "vertical" rays face up or down and are spread across its width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RaySpacing {
    pub horizontal_count: u32,
    pub vertical_count: u32,
    pub horizontal: f32,
    pub vertical: f32,
}

/// Compute the four cast-origins for a box shrunk inward by `skin_width`.
pub fn ray_origins(bounds: Aabb, skin_width: f32) -> RayOrigins {
    let b = bounds.shrunk(skin_width);
    RayOrigins {
        bottom_left: b.min,
        bottom_right: Vec2::new(b.max.x, b.min.y),
        top_left: Vec2::new(b.min.x, b.max.y),
        top_right: b.max,
    }
}

/// Compute ray counts and spacing for a box.
///
/// Counts round `dimension / max_ray_gap`; spacing divides the dimension by
/// `count - 1` so the first and last rays sit exactly on the corners. A
/// count below 2 would divide by zero and is rejected here, at
/// configuration time.
pub fn ray_spacing(bounds: Aabb, skin_width: f32, max_ray_gap: f32) -> Result<RaySpacing, ConfigError> {
    let size = bounds.shrunk(skin_width).size();

    let horizontal_count = (size.y / max_ray_gap).round() as u32;
    if horizontal_count < 2 {
        return Err(ConfigError::TooFewRays {
            axis: "horizontal",
            count: horizontal_count,
        });
    }

    let vertical_count = (size.x / max_ray_gap).round() as u32;
    if vertical_count < 2 {
        return Err(ConfigError::TooFewRays {
            axis: "vertical",
            count: vertical_count,
        });
    }

    Ok(RaySpacing {
        horizontal_count,
        vertical_count,
        horizontal: size.y / (horizontal_count - 1) as f32,
        vertical: size.x / (vertical_count - 1) as f32,
    })
}
