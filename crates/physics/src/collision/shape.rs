//! Brush shapes and ray hit results.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layers::Surface;
use super::world::BrushId;

/// Axis-aligned bounding box stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from a center point and half-extents.
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Shrink the box inward by `amount` on every side.
    pub fn shrunk(&self, amount: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(amount),
            max: self.max - Vec2::splat(amount),
        }
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Geometry of a single brush.
///
/// Boxes model floors, walls, and platforms. Segments model sloped ground:
/// a segment is a one-dimensional surface with a well-defined normal, which
/// is exactly what the slope-traversal code needs from the substrate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box.
    Box(Aabb),
    /// Line segment from `a` to `b`. The reported hit normal always faces
    /// against the incoming ray.
    Segment { a: Vec2, b: Vec2 },
}

impl Shape {
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Box(aabb) => *aabb = aabb.translated(delta),
            Self::Segment { a, b } => {
                *a += delta;
                *b += delta;
            }
        }
    }

    /// Bounding box of the shape.
    pub fn bounds(&self) -> Aabb {
        match self {
            Self::Box(aabb) => *aabb,
            Self::Segment { a, b } => Aabb {
                min: a.min(*b),
                max: a.max(*b),
            },
        }
    }
}

/// Result of a world raycast.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Distance along the ray to the hit, in world units.
    ///
    /// `0.0` means the ray started inside the brush (already embedded);
    /// `normal` is zero in that case.
    pub distance: f32,

    /// World-space hit point.
    pub point: Vec2,

    /// Surface normal at the hit, facing against the ray.
    pub normal: Vec2,

    /// The brush that was hit.
    pub brush: BrushId,

    /// Surface tag of the hit brush.
    pub surface: Surface,
}
