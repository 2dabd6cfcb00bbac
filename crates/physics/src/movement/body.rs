//! The kinematic body and its motion resolver.
//!
//! `move_by` is the whole per-tick contract: it takes the displacement the
//! motivator wants, clamps it against geometry with corner-anchored ray
//! sweeps, rebuilds the collision state, and translates the body by
//! whatever survived. Pass order is fixed and load-bearing: slope descent
//! pre-processing, horizontal sweep, vertical sweep, then one correction
//! ray for slopes whose angle changed mid-step. The vertical sweep offsets
//! its origins by the already-resolved horizontal displacement, and the
//! correction ray offsets by the resolved vertical one; reordering any of
//! this reintroduces slope jitter.

use glam::Vec2;

use crate::collision::{Aabb, BrushId, CollisionWorld, Layers, Surface};

use super::config::{BodyConfig, ConfigError};
use super::raycast::{ray_origins, ray_spacing, RayOrigins, RaySpacing};
use super::slopes;
use super::state::CollisionState;

/// Everything a single resolution pass needs to cast rays.
///
/// Borrowed, immutable, and rebuilt for every move call from the body's
/// current pose.
pub struct SweepContext<'a> {
    pub world: &'a CollisionWorld,
    pub origins: RayOrigins,
    pub spacing: RaySpacing,
    pub skin: f32,
    /// Maximum climbable slope angle, radians.
    pub max_slope_angle: f32,
    pub mask: Layers,
}

/// A box-shaped body moved exclusively through [`KinematicBody::move_by`].
#[derive(Debug)]
pub struct KinematicBody {
    position: Vec2,
    half_extents: Vec2,
    brush: BrushId,
    config: BodyConfig,
    spacing: RaySpacing,
    state: CollisionState,
}

impl KinematicBody {
    /// Create a body centered at `center` and register its brush in the
    /// world on the configured layer.
    ///
    /// Fails if the box is too small for the configured ray gap.
    pub fn new(
        world: &mut CollisionWorld,
        center: Vec2,
        half_extents: Vec2,
        config: BodyConfig,
    ) -> Result<Self, ConfigError> {
        let bounds = Aabb::from_center_half_extents(center, half_extents);
        let spacing = ray_spacing(bounds, config.skin_width, config.max_ray_gap)?;
        let brush = world.add_box(center, half_extents, config.layer, Surface::Solid);

        Ok(Self {
            position: center,
            half_extents,
            brush,
            config,
            spacing,
            state: CollisionState::default(),
        })
    }

    /// Center of the body.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current bounding box, recomputed from the position.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    /// The body's brush in the collision world (what platform passenger
    /// sweeps detect).
    #[inline]
    pub fn brush(&self) -> BrushId {
        self.brush
    }

    /// Contact state from the most recent move call.
    #[inline]
    pub fn state(&self) -> &CollisionState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// Resolve a desired displacement against the world and apply it.
    ///
    /// `input` is the raw directional input (its `y <= -1` arms the
    /// drop-through of one-way platforms), `standing_on_platform` is the
    /// transport component's hint that forces `below`, and `now` is the
    /// simulation clock in seconds. Returns the displacement actually
    /// applied; the resulting contact state is readable via [`state`].
    ///
    /// [`state`]: KinematicBody::state
    pub fn move_by(
        &mut self,
        world: &mut CollisionWorld,
        amount: Vec2,
        input: Vec2,
        standing_on_platform: bool,
        now: f32,
    ) -> Vec2 {
        let ctx = SweepContext {
            world,
            origins: ray_origins(self.bounds(), self.config.skin_width),
            spacing: self.spacing,
            skin: self.config.skin_width,
            max_slope_angle: self.config.max_slope_angle(),
            mask: self.config.collision_mask,
        };

        let (resolved, state) = resolve(&ctx, self.state, amount, input, now);
        self.state = state;

        self.position += resolved;
        world.translate_brush(self.brush, resolved);

        if standing_on_platform {
            self.state.below = true;
        }

        resolved
    }

    /// Remove the body's brush from the world. Call when despawning.
    pub fn remove(self, world: &mut CollisionWorld) {
        world.remove_brush(self.brush);
    }
}

/// The resolution core: desired displacement in, permitted displacement and
/// the next collision state out.
///
/// Free of the body so it can be tested against bare geometry.
pub fn resolve(
    ctx: &SweepContext<'_>,
    state: CollisionState,
    desired: Vec2,
    input: Vec2,
    now: f32,
) -> (Vec2, CollisionState) {
    let mut state = state;
    let mut amount = desired;

    state.begin_tick();
    state.move_amount_old = desired;

    if amount.y < 0.0 {
        slopes::descend_slope(ctx, &mut state, &mut amount);
    }

    if amount.x != 0.0 {
        state.face_dir = amount.x.signum();
    }

    horizontal_sweep(ctx, &mut state, &mut amount);

    if amount.y != 0.0 {
        vertical_sweep(ctx, &mut state, &mut amount, input, now);
    }

    (amount, state)
}

// ============================================================================
// Sweeps
// ============================================================================

fn horizontal_sweep(ctx: &SweepContext<'_>, state: &mut CollisionState, amount: &mut Vec2) {
    let direction_x = state.face_dir;
    let mut ray_length = amount.x.abs() + ctx.skin;

    if amount.x.abs() < ctx.skin {
        // One skin width reaches the collider edge, the second reaches far
        // enough past it to still detect an adjacent wall.
        ray_length = 2.0 * ctx.skin;
    }

    for i in 0..ctx.spacing.horizontal_count {
        let corner = if direction_x == -1.0 {
            ctx.origins.bottom_left
        } else {
            ctx.origins.bottom_right
        };
        let origin = corner + Vec2::Y * (ctx.spacing.horizontal * i as f32);

        let Some(hit) = ctx
            .world
            .raycast(origin, Vec2::X * direction_x, ray_length, ctx.mask)
        else {
            continue;
        };

        if hit.distance == 0.0 {
            // Already embedded (a platform moved into us from the side).
            continue;
        }

        let slope_angle = slopes::angle_from_up(hit.normal);

        if i == 0 && slope_angle <= ctx.max_slope_angle {
            if state.descending_slope {
                // Descend flowed straight into a climb; the descend rewrite
                // was wrong for this tick, so restore the original request.
                state.descending_slope = false;
                *amount = state.move_amount_old;
            }

            let mut distance_to_slope_start = 0.0;
            if slope_angle != state.previous_slope_angle {
                // New slope: trim the pre-contact gap so climbing starts
                // exactly at the surface, then give the gap back after.
                distance_to_slope_start = hit.distance - ctx.skin;
                amount.x -= distance_to_slope_start * direction_x;
            }
            slopes::climb_slope(state, amount, slope_angle, hit.normal);
            amount.x += distance_to_slope_start * direction_x;
        }

        if !state.climbing_slope || slope_angle > ctx.max_slope_angle {
            amount.x = (hit.distance - ctx.skin) * direction_x;
            ray_length = hit.distance;

            if state.climbing_slope {
                // Obstacle met mid-climb: keep the vertical component
                // consistent with the slope so the body does not jitter.
                amount.y = state.slope_angle.tan() * amount.x.abs();
            }

            state.left = direction_x == -1.0;
            state.right = direction_x == 1.0;
        }
    }
}

fn vertical_sweep(
    ctx: &SweepContext<'_>,
    state: &mut CollisionState,
    amount: &mut Vec2,
    input: Vec2,
    now: f32,
) {
    let direction_y = amount.y.signum();
    let mut ray_length = amount.y.abs() + ctx.skin;

    for i in 0..ctx.spacing.vertical_count {
        let corner = if direction_y == -1.0 {
            ctx.origins.bottom_left
        } else {
            ctx.origins.top_left
        };
        let origin = corner + Vec2::X * (ctx.spacing.vertical * i as f32 + amount.x);

        let Some(hit) = ctx
            .world
            .raycast(origin, Vec2::Y * direction_y, ray_length, ctx.mask)
        else {
            continue;
        };

        if hit.surface == Surface::PassThrough {
            if direction_y == 1.0 || hit.distance == 0.0 {
                continue;
            }
            if state.dropping_through(now) {
                continue;
            }
            if input.y <= -1.0 {
                // Drop requested: open the grace window and let this tick
                // fall through.
                state.arm_drop_through(now);
                continue;
            }
        }

        amount.y = (hit.distance - ctx.skin) * direction_y;
        ray_length = hit.distance;

        if state.climbing_slope {
            // Ceiling met mid-climb: pull the horizontal component back to
            // stay on the slope's diagonal.
            amount.x = amount.y / state.slope_angle.tan() * amount.x.signum();
        }

        state.below = direction_y == -1.0;
        state.above = direction_y == 1.0;
    }

    if state.climbing_slope {
        // A curved slope can change angle within a single step. Re-check
        // from the post-vertical position so the next horizontal clamp
        // matches the surface the body actually lands on.
        let direction_x = amount.x.signum();
        ray_length = amount.x.abs() + ctx.skin;
        let corner = if direction_x == -1.0 {
            ctx.origins.bottom_left
        } else {
            ctx.origins.bottom_right
        };
        let origin = corner + Vec2::Y * amount.y;

        if let Some(hit) = ctx
            .world
            .raycast(origin, Vec2::X * direction_x, ray_length, ctx.mask)
        {
            let slope_angle = slopes::angle_from_up(hit.normal);
            if slope_angle != state.slope_angle {
                amount.x = (hit.distance - ctx.skin) * direction_x;
                state.slope_angle = slope_angle;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
