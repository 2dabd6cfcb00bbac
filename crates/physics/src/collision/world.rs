//! The collision world: brush storage and the raycast primitive.

use glam::Vec2;

use super::layers::{Layers, Surface};
use super::shape::{Aabb, RayHit, Shape};

/// Stable handle to a brush in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BrushId(pub u32);

/// A piece of collision geometry.
#[derive(Debug, Clone)]
pub struct Brush {
    pub id: BrushId,
    pub shape: Shape,
    pub layers: Layers,
    pub surface: Surface,
}

/// The collision world containing all geometry.
///
/// Brushes are persistent: level geometry is added once, while bodies and
/// moving platforms register a brush at creation and re-anchor it whenever
/// they move. All queries are read-only; mutation happens only through the
/// explicit `translate_brush`/`remove_brush` calls of the owning object.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<Brush>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box brush.
    pub fn add_box(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        layers: Layers,
        surface: Surface,
    ) -> BrushId {
        self.add_shape(
            Shape::Box(Aabb::from_center_half_extents(center, half_extents)),
            layers,
            surface,
        )
    }

    /// Add a slope segment brush from `a` to `b`.
    pub fn add_slope(&mut self, a: Vec2, b: Vec2, layers: Layers, surface: Surface) -> BrushId {
        self.add_shape(Shape::Segment { a, b }, layers, surface)
    }

    /// Add a brush with an arbitrary shape.
    pub fn add_shape(&mut self, shape: Shape, layers: Layers, surface: Surface) -> BrushId {
        let id = BrushId(self.next_id);
        self.next_id += 1;
        self.brushes.push(Brush {
            id,
            shape,
            layers,
            surface,
        });
        id
    }

    /// Remove a brush. Safe to call with an id that is already gone.
    pub fn remove_brush(&mut self, id: BrushId) {
        self.brushes.retain(|b| b.id != id);
    }

    /// Move a brush by `delta`. Used by bodies and platforms after they
    /// translate themselves.
    pub fn translate_brush(&mut self, id: BrushId, delta: Vec2) {
        if let Some(brush) = self.brushes.iter_mut().find(|b| b.id == id) {
            brush.shape.translate(delta);
        }
    }

    /// Look up a brush by id.
    pub fn brush(&self, id: BrushId) -> Option<&Brush> {
        self.brushes.iter().find(|b| b.id == id)
    }

    /// Number of brushes in the world.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Cast a ray and return the nearest hit on a matching layer.
    ///
    /// `dir` must be a unit vector; `max_distance` may be infinite. A ray
    /// starting inside a box brush reports distance `0.0` with a zero
    /// normal.
    pub fn raycast(
        &self,
        origin: Vec2,
        dir: Vec2,
        max_distance: f32,
        mask: Layers,
    ) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        for brush in &self.brushes {
            if !mask.intersects(brush.layers) {
                continue;
            }

            let hit = match brush.shape {
                Shape::Box(aabb) => ray_box(origin, dir, aabb),
                Shape::Segment { a, b } => ray_segment(origin, dir, a, b),
            };

            if let Some((distance, normal)) = hit {
                if distance > max_distance {
                    continue;
                }
                let closer = best.map_or(true, |b| distance < b.distance);
                if closer {
                    best = Some(RayHit {
                        distance,
                        point: origin + dir * distance,
                        normal,
                        brush: brush.id,
                        surface: brush.surface,
                    });
                }
            }
        }

        best
    }
}

/// Ray vs. axis-aligned box, slab method with entry-normal tracking.
fn ray_box(origin: Vec2, dir: Vec2, aabb: Aabb) -> Option<(f32, Vec2)> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    let mut n_enter = Vec2::ZERO;

    // X axis
    if dir.x.abs() < f32::EPSILON {
        if origin.x < aabb.min.x || origin.x > aabb.max.x {
            return None;
        }
    } else {
        let inv = 1.0 / dir.x;
        let mut t1 = (aabb.min.x - origin.x) * inv;
        let mut t2 = (aabb.max.x - origin.x) * inv;
        let mut nx = -1.0;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            nx = 1.0;
        }
        if t1 > tmin {
            tmin = t1;
            n_enter = Vec2::new(nx, 0.0);
        }
        tmax = tmax.min(t2);
        if tmin > tmax {
            return None;
        }
    }

    // Y axis
    if dir.y.abs() < f32::EPSILON {
        if origin.y < aabb.min.y || origin.y > aabb.max.y {
            return None;
        }
    } else {
        let inv = 1.0 / dir.y;
        let mut t1 = (aabb.min.y - origin.y) * inv;
        let mut t2 = (aabb.max.y - origin.y) * inv;
        let mut ny = -1.0;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            ny = 1.0;
        }
        if t1 > tmin {
            tmin = t1;
            n_enter = Vec2::new(0.0, ny);
        }
        tmax = tmax.min(t2);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    if tmin < 0.0 {
        // Origin inside the box: immediate embedded hit.
        return Some((0.0, Vec2::ZERO));
    }
    Some((tmin, n_enter))
}

/// Ray vs. line segment. The returned normal is the segment perpendicular
/// oriented against the ray.
fn ray_segment(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> Option<(f32, Vec2)> {
    let d = b - a;
    let denom = dir.perp_dot(d);
    if denom.abs() < f32::EPSILON {
        return None;
    }

    let ao = a - origin;
    let t = ao.perp_dot(d) / denom;
    let s = ao.perp_dot(dir) / denom;

    if t < 0.0 || !(0.0..=1.0).contains(&s) {
        return None;
    }

    let mut normal = d.perp().normalize_or_zero();
    if normal.dot(dir) > 0.0 {
        normal = -normal;
    }
    Some((t, normal))
}
