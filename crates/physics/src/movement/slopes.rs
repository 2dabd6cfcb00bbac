//! Slope climbing, descending, and forced slides.
//!
//! These are the slope-handling halves of the motion resolver, split out of
//! the sweep loops. All of them rewrite the in-flight displacement and mark
//! the collision state; none of them touch the body itself.

use glam::Vec2;

use crate::collision::RayHit;

use super::body::SweepContext;
use super::state::CollisionState;

/// Angle between a surface normal and straight up, in radians.
///
/// Flat ground is `0`, a vertical wall is `PI/2`.
#[inline]
pub(crate) fn angle_from_up(normal: Vec2) -> f32 {
    normal.y.clamp(-1.0, 1.0).acos()
}

/// Redirect a horizontal displacement up along a climbable slope.
///
/// The horizontal magnitude becomes distance traveled along the surface:
/// `y = sin(angle) * distance`, `x = cos(angle) * distance`. Does nothing
/// when the requested vertical displacement already exceeds the climb
/// (the body is jumping off the slope).
pub(crate) fn climb_slope(
    state: &mut CollisionState,
    amount: &mut Vec2,
    slope_angle: f32,
    slope_normal: Vec2,
) {
    let move_distance = amount.x.abs();
    let climb_y = slope_angle.sin() * move_distance;

    if amount.y <= climb_y {
        amount.y = climb_y;
        amount.x = slope_angle.cos() * move_distance * amount.x.signum();
        state.below = true;
        state.climbing_slope = true;
        state.slope_angle = slope_angle;
        state.slope_normal = slope_normal;
    }
}

/// Slope descent pre-processing, run before the horizontal sweep whenever
/// the body is moving downward.
///
/// First checks both bottom corners straight down for a too-steep surface:
/// exactly one side over such a surface forces a slide instead of a normal
/// descent. Otherwise casts from the trailing bottom corner with unbounded
/// length; a climbable, non-flat surface facing the direction of travel
/// that is close enough to reach this tick rewrites the displacement to
/// follow the slope downward.
pub(crate) fn descend_slope(ctx: &SweepContext<'_>, state: &mut CollisionState, amount: &mut Vec2) {
    let ray_length = amount.y.abs() + ctx.skin;
    let hit_left = ctx
        .world
        .raycast(ctx.origins.bottom_left, -Vec2::Y, ray_length, ctx.mask);
    let hit_right = ctx
        .world
        .raycast(ctx.origins.bottom_right, -Vec2::Y, ray_length, ctx.mask);

    // Straddling a steep ledge on exactly one side forces the slide.
    if hit_left.is_some() != hit_right.is_some() {
        if let Some(hit) = hit_left {
            slide_down_incline(ctx, state, &hit, amount);
        }
        if let Some(hit) = hit_right {
            slide_down_incline(ctx, state, &hit, amount);
        }
    }

    if !state.sliding_down_max_slope {
        let direction_x = amount.x.signum();
        let origin = if direction_x == -1.0 {
            ctx.origins.bottom_right
        } else {
            ctx.origins.bottom_left
        };
        let Some(hit) = ctx.world.raycast(origin, -Vec2::Y, f32::INFINITY, ctx.mask) else {
            return;
        };

        let slope_angle = angle_from_up(hit.normal);
        if slope_angle != 0.0
            && slope_angle <= ctx.max_slope_angle
            && hit.normal.x.signum() == direction_x
            && hit.distance - ctx.skin <= slope_angle.tan() * amount.x.abs()
        {
            let move_distance = amount.x.abs();
            let descend_y = slope_angle.sin() * move_distance;
            amount.x = slope_angle.cos() * move_distance * amount.x.signum();
            amount.y -= descend_y;

            state.slope_angle = slope_angle;
            state.descending_slope = true;
            state.below = true;
            state.slope_normal = hit.normal;
        }
    }
}

/// Forced slide down a surface steeper than the climbable maximum.
///
/// This is the only path that produces horizontal motion purely from
/// falling, independent of input: the portion of the fall not spent
/// reaching the surface is converted sideways along it.
pub(crate) fn slide_down_incline(
    ctx: &SweepContext<'_>,
    state: &mut CollisionState,
    hit: &RayHit,
    amount: &mut Vec2,
) {
    let slope_angle = angle_from_up(hit.normal);
    if slope_angle <= ctx.max_slope_angle {
        return;
    }

    // The tangent blows up as the surface approaches vertical; a non-finite
    // result would poison the position, so the slide is dropped instead.
    let slide_x = hit.normal.x.signum() * (amount.y.abs() - hit.distance) / slope_angle.tan();
    if !slide_x.is_finite() {
        log::warn!("degenerate slope angle {slope_angle} rad during slide, ignoring");
        return;
    }

    amount.x = slide_x;
    state.slope_angle = slope_angle;
    state.sliding_down_max_slope = true;
    state.slope_normal = hit.normal;
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::collision::{BrushId, CollisionWorld, Layers, RayHit, Surface};
    use crate::movement::body::SweepContext;
    use crate::movement::raycast::{ray_origins, ray_spacing};
    use crate::movement::state::CollisionState;
    use crate::collision::Aabb;

    use super::*;

    const SKIN: f32 = 0.015;

    fn context<'a>(world: &'a CollisionWorld, bounds: Aabb, max_slope_deg: f32) -> SweepContext<'a> {
        SweepContext {
            world,
            origins: ray_origins(bounds, SKIN),
            spacing: ray_spacing(bounds, SKIN, 0.25).unwrap(),
            skin: SKIN,
            max_slope_angle: max_slope_deg.to_radians(),
            mask: Layers::SOLID,
        }
    }

    fn hit_with_normal(normal: Vec2, distance: f32) -> RayHit {
        RayHit {
            distance,
            point: Vec2::ZERO,
            normal,
            brush: BrushId(0),
            surface: Surface::Solid,
        }
    }

    #[test]
    fn test_angle_from_up() {
        assert_eq!(angle_from_up(Vec2::Y), 0.0);
        let wall = angle_from_up(Vec2::X);
        assert!((wall - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_climb_redirects_along_slope() {
        let mut state = CollisionState::default();
        let mut amount = Vec2::new(0.1, -0.05);
        let angle = 30f32.to_radians();

        climb_slope(&mut state, &mut amount, angle, Vec2::new(-angle.sin(), angle.cos()));

        assert!((amount.x - angle.cos() * 0.1).abs() < 1e-6);
        assert!((amount.y - angle.sin() * 0.1).abs() < 1e-6);
        assert!(state.below);
        assert!(state.climbing_slope);
        assert_eq!(state.slope_angle, angle);
    }

    #[test]
    fn test_climb_yields_to_faster_upward_motion() {
        // Jumping off the slope: requested y already beats the climb.
        let mut state = CollisionState::default();
        let mut amount = Vec2::new(0.1, 0.5);
        climb_slope(&mut state, &mut amount, 30f32.to_radians(), Vec2::Y);

        assert_eq!(amount, Vec2::new(0.1, 0.5));
        assert!(!state.climbing_slope);
    }

    #[test]
    fn test_slide_down_steep_incline() {
        let world = CollisionWorld::new();
        let bounds = Aabb::from_center_half_extents(Vec2::ZERO, Vec2::new(0.35, 0.5));
        let ctx = context(&world, bounds, 10.0);

        let angle = 60f32.to_radians();
        let normal = Vec2::new(angle.sin(), angle.cos());
        let hit = hit_with_normal(normal, 0.01);
        let mut state = CollisionState::default();
        let mut amount = Vec2::new(0.3, -0.2);

        slide_down_incline(&ctx, &mut state, &hit, &mut amount);

        let expected_x = normal.x.signum() * (0.2 - 0.01) / angle.tan();
        assert!((amount.x - expected_x).abs() < 1e-6);
        assert!(state.sliding_down_max_slope);
        assert_eq!(state.slope_angle, angle);
        // Horizontal motion comes from the fall, not the input direction.
        assert!(amount.x > 0.0);
    }

    #[test]
    fn test_slide_ignores_climbable_surface() {
        let world = CollisionWorld::new();
        let bounds = Aabb::from_center_half_extents(Vec2::ZERO, Vec2::new(0.35, 0.5));
        let ctx = context(&world, bounds, 45.0);

        let angle = 20f32.to_radians();
        let hit = hit_with_normal(Vec2::new(angle.sin(), angle.cos()), 0.05);
        let mut state = CollisionState::default();
        let mut amount = Vec2::new(0.1, -0.2);

        slide_down_incline(&ctx, &mut state, &hit, &mut amount);

        assert!(!state.sliding_down_max_slope);
        assert_eq!(amount.x, 0.1);
    }

    #[test]
    fn test_slide_guards_vertical_surface() {
        // A 90 degree "slope" has an infinite tangent; the slide must be
        // dropped rather than producing a non-finite displacement.
        let world = CollisionWorld::new();
        let bounds = Aabb::from_center_half_extents(Vec2::ZERO, Vec2::new(0.35, 0.5));
        let ctx = context(&world, bounds, 10.0);

        let hit = hit_with_normal(Vec2::X, 0.0);
        let mut state = CollisionState::default();
        let mut amount = Vec2::new(0.1, -0.2);

        slide_down_incline(&ctx, &mut state, &hit, &mut amount);

        assert!(amount.x.is_finite());
        assert!(amount.y.is_finite());
    }

    #[test]
    fn test_descend_follows_gentle_slope() {
        let mut world = CollisionWorld::new();
        // Slope descending to the right at 8 degrees; body on top moving right.
        let angle = 8f32.to_radians();
        let run = 20.0;
        world.add_slope(
            Vec2::new(-2.0, 2.0),
            Vec2::new(-2.0 + run, 2.0 - run * angle.tan()),
            Layers::SOLID,
            Surface::Solid,
        );

        // Body resting on the slope near its top.
        let bounds = Aabb {
            min: Vec2::new(0.0, 2.0 - 2.0 * angle.tan()),
            max: Vec2::new(0.7, 3.0),
        };
        let ctx = context(&world, bounds, 10.0);
        let mut state = CollisionState::default();
        let mut amount = Vec2::new(0.1, -0.01);

        descend_slope(&ctx, &mut state, &mut amount);

        assert!(state.descending_slope);
        assert!(state.below);
        assert!((state.slope_angle - angle).abs() < 1e-3);
        // Displacement follows the surface downward.
        assert!(amount.x > 0.0);
        assert!(amount.y < -0.01);
    }

    #[test]
    fn test_descend_ignores_slope_against_travel() {
        let mut world = CollisionWorld::new();
        // Slope descending to the right, but the body moves left (uphill).
        let angle = 8f32.to_radians();
        world.add_slope(
            Vec2::new(-2.0, 2.0),
            Vec2::new(18.0, 2.0 - 20.0 * angle.tan()),
            Layers::SOLID,
            Surface::Solid,
        );
        let bounds = Aabb {
            min: Vec2::new(0.0, 2.0 - 2.0 * angle.tan()),
            max: Vec2::new(0.7, 3.0),
        };
        let ctx = context(&world, bounds, 10.0);
        let mut state = CollisionState::default();
        let mut amount = Vec2::new(-0.1, -0.01);

        descend_slope(&ctx, &mut state, &mut amount);

        assert!(!state.descending_slope);
        assert_eq!(amount, Vec2::new(-0.1, -0.01));
    }
}
