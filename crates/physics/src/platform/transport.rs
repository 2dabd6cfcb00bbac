//! Passenger detection and sequenced movement for platforms.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{Aabb, BrushId, CollisionWorld, Layers, Surface};
use crate::movement::{ray_origins, ray_spacing, ConfigError, RayOrigins, RaySpacing};

use super::path::WaypointPath;

/// Identity of a registered passenger, assigned by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PassengerId(pub u32);

/// One planned passenger move for the current tick.
///
/// Rebuilt from scratch every platform tick and discarded after use.
#[derive(Debug, Clone, Copy)]
pub struct PassengerMovement {
    pub passenger: PassengerId,
    /// Displacement to feed the passenger's motion resolver.
    pub amount: Vec2,
    /// Whether the passenger stands on the platform (forces its `below`
    /// flag through the resolver's hint).
    pub standing_on_platform: bool,
    /// Whether the passenger moves before the platform translates.
    pub move_before_platform: bool,
}

/// The transport's view of whoever owns the passenger bodies.
///
/// `move_passenger` drives the named body through its own motion resolver
/// and returns `false` if the passenger no longer exists; the transport
/// drops such entries from the tick instead of failing.
pub trait PassengerRegistry {
    fn move_passenger(
        &mut self,
        world: &mut CollisionWorld,
        passenger: PassengerId,
        amount: Vec2,
        standing_on_platform: bool,
        now: f32,
    ) -> bool;
}

/// Configuration for a moving platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Waypoints as offsets from the platform's starting position.
    pub local_waypoints: Vec<Vec2>,
    /// Travel speed in units per second.
    pub speed: f32,
    /// `true` wraps 0-1-2-0-1..., `false` ping-pongs 0-1-2-1-0...
    pub cyclic: bool,
    /// Pause at each waypoint, seconds.
    pub wait_time: f32,
    /// Easing exponent offset; 0 leaves traversal linear.
    pub ease_amount: f32,
    /// Skin inset for the platform's own detection rays.
    pub skin_width: f32,
    /// Maximum gap between adjacent detection rays.
    pub max_ray_gap: f32,
    /// Layers scanned for passengers (distinct from solid geometry).
    pub passenger_mask: Layers,
    /// Surface tag of the platform itself; `PassThrough` makes it a
    /// one-way platform for body collision.
    pub surface: Surface,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            local_waypoints: Vec::new(),
            speed: 1.0,
            cyclic: false,
            wait_time: 0.0,
            ease_amount: 0.0,
            skin_width: 0.015,
            max_ray_gap: 0.25,
            passenger_mask: Layers::PASSENGER,
            surface: Surface::Solid,
        }
    }
}

/// A moving platform: waypoint traversal plus passenger transport.
#[derive(Debug)]
pub struct PlatformController {
    position: Vec2,
    half_extents: Vec2,
    brush: BrushId,
    path: WaypointPath,
    spacing: RaySpacing,
    skin: f32,
    passenger_mask: Layers,
    /// Capability handles for bodies that may ride this platform, keyed by
    /// the brush their detection rays will hit. Populated at registration
    /// time, never lazily.
    handles: HashMap<BrushId, PassengerId>,
}

impl PlatformController {
    /// Create a platform centered at `center` and register its brush as
    /// solid geometry.
    pub fn new(
        world: &mut CollisionWorld,
        center: Vec2,
        half_extents: Vec2,
        config: PlatformConfig,
    ) -> Result<Self, ConfigError> {
        let bounds = Aabb::from_center_half_extents(center, half_extents);
        let spacing = ray_spacing(bounds, config.skin_width, config.max_ray_gap)?;
        let path = WaypointPath::new(
            center,
            &config.local_waypoints,
            config.speed,
            config.cyclic,
            config.wait_time,
            config.ease_amount,
        )?;
        let brush = world.add_box(center, half_extents, Layers::SOLID, config.surface);

        Ok(Self {
            position: center,
            half_extents,
            brush,
            path,
            spacing,
            skin: config.skin_width,
            passenger_mask: config.passenger_mask,
            handles: HashMap::new(),
        })
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    /// Register the capability handle for a body that may ride this
    /// platform. `brush` is the body's brush in the collision world.
    pub fn register_passenger(&mut self, brush: BrushId, passenger: PassengerId) {
        self.handles.insert(brush, passenger);
    }

    /// Forget a previously registered passenger.
    pub fn unregister_passenger(&mut self, brush: BrushId) {
        self.handles.remove(&brush);
    }

    /// Advance the platform one tick.
    ///
    /// Computes this tick's displacement from the waypoint path, detects
    /// passengers, then sequences: passengers flagged to move first, the
    /// platform itself, remaining passengers.
    pub fn update(
        &mut self,
        world: &mut CollisionWorld,
        passengers: &mut dyn PassengerRegistry,
        dt: f32,
        now: f32,
    ) {
        let velocity = self.path.step(self.position, dt, now);
        let origins = ray_origins(self.bounds(), self.skin);
        let movements = self.calculate_passenger_movement(world, &origins, velocity);

        self.drive_passengers(world, passengers, &movements, true, now);
        self.position += velocity;
        world.translate_brush(self.brush, velocity);
        self.drive_passengers(world, passengers, &movements, false, now);
    }

    fn drive_passengers(
        &self,
        world: &mut CollisionWorld,
        registry: &mut dyn PassengerRegistry,
        movements: &[PassengerMovement],
        before_platform: bool,
        now: f32,
    ) {
        for m in movements
            .iter()
            .filter(|m| m.move_before_platform == before_platform)
        {
            let moved =
                registry.move_passenger(world, m.passenger, m.amount, m.standing_on_platform, now);
            if !moved {
                log::warn!(
                    "passenger {:?} vanished before its move, dropping it this tick",
                    m.passenger
                );
            }
        }
    }

    /// Detect passengers via three ray sweeps and plan their movements.
    ///
    /// Each body is claimed by at most one sweep per tick; the `moved` set
    /// enforces that.
    fn calculate_passenger_movement(
        &self,
        world: &CollisionWorld,
        origins: &RayOrigins,
        velocity: Vec2,
    ) -> Vec<PassengerMovement> {
        let mut moved: HashSet<BrushId> = HashSet::new();
        let mut movements = Vec::new();

        let direction_x = velocity.x.signum();
        let direction_y = velocity.y.signum();

        // Vertically moving platform: bodies above (moving up) get carried,
        // bodies below (moving down) get pushed out of the way.
        if velocity.y != 0.0 {
            let ray_length = velocity.y.abs() + self.skin;

            for i in 0..self.spacing.vertical_count {
                let corner = if direction_y == -1.0 {
                    origins.bottom_left
                } else {
                    origins.top_left
                };
                let origin = corner + Vec2::X * (self.spacing.vertical * i as f32);

                let Some(hit) =
                    world.raycast(origin, Vec2::Y * direction_y, ray_length, self.passenger_mask)
                else {
                    continue;
                };
                if hit.distance == 0.0 || moved.contains(&hit.brush) {
                    continue;
                }
                let Some(&passenger) = self.handles.get(&hit.brush) else {
                    log::debug!("unregistered body {:?} in vertical sweep", hit.brush);
                    continue;
                };

                moved.insert(hit.brush);
                let push_x = if direction_y == 1.0 { velocity.x } else { 0.0 };
                let push_y = velocity.y - (hit.distance - self.skin) * direction_y;
                movements.push(PassengerMovement {
                    passenger,
                    amount: Vec2::new(push_x, push_y),
                    standing_on_platform: direction_y == 1.0,
                    move_before_platform: true,
                });
            }
        }

        // Horizontally moving platform: bodies in its way are pushed from
        // the side, with a small downward nudge that keeps their ground
        // rays in contact.
        if velocity.x != 0.0 {
            let ray_length = velocity.x.abs() + self.skin;

            for i in 0..self.spacing.horizontal_count {
                let corner = if direction_x == -1.0 {
                    origins.bottom_left
                } else {
                    origins.bottom_right
                };
                let origin = corner + Vec2::Y * (self.spacing.horizontal * i as f32);

                let Some(hit) =
                    world.raycast(origin, Vec2::X * direction_x, ray_length, self.passenger_mask)
                else {
                    continue;
                };
                if hit.distance == 0.0 || moved.contains(&hit.brush) {
                    continue;
                }
                let Some(&passenger) = self.handles.get(&hit.brush) else {
                    log::debug!("unregistered body {:?} in horizontal sweep", hit.brush);
                    continue;
                };

                moved.insert(hit.brush);
                let push_x = velocity.x - (hit.distance - self.skin) * direction_x;
                let push_y = -self.skin;
                movements.push(PassengerMovement {
                    passenger,
                    amount: Vec2::new(push_x, push_y),
                    standing_on_platform: false,
                    move_before_platform: true,
                });
            }
        }

        // Bodies riding on top of a sideways or downward moving platform:
        // short feeler rays up from the top face, full velocity passed
        // through, moved after the platform so they settle onto it.
        if (velocity.y == 0.0 && velocity.x != 0.0) || direction_y == -1.0 {
            let ray_length = self.skin * 2.0;

            for i in 0..self.spacing.vertical_count {
                let origin = origins.top_left + Vec2::X * (self.spacing.vertical * i as f32);

                let Some(hit) = world.raycast(origin, Vec2::Y, ray_length, self.passenger_mask)
                else {
                    continue;
                };
                if hit.distance == 0.0 || moved.contains(&hit.brush) {
                    continue;
                }
                let Some(&passenger) = self.handles.get(&hit.brush) else {
                    log::debug!("unregistered body {:?} in top-rider sweep", hit.brush);
                    continue;
                };

                moved.insert(hit.brush);
                movements.push(PassengerMovement {
                    passenger,
                    amount: velocity,
                    standing_on_platform: true,
                    move_before_platform: false,
                });
            }
        }

        movements
    }
}
