//! Level assembly: geometry, one-way ledges, moving platforms, spawns.

use bramble_physics::{CollisionWorld, Layers, PlatformConfig, PlatformController, Surface};
use glam::Vec2;

/// A game level: the collision world plus everything that moves in it.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub name: String,

    /// Collision world for physics.
    pub world: CollisionWorld,

    /// Moving platforms, updated each tick before the players.
    pub platforms: Vec<PlatformController>,

    /// Player spawn positions (body centers).
    pub spawn_points: Vec<Vec2>,
}

impl Level {
    /// Create an empty level.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            world: CollisionWorld::new(),
            platforms: Vec::new(),
            spawn_points: Vec::new(),
        }
    }

    /// A small test arena exercising every surface kind: flat floor, walls,
    /// a climbable slope, a too-steep slope, a one-way ledge, and a
    /// ping-pong moving platform.
    pub fn test_arena() -> Self {
        let mut level = Self::new("test_arena");

        // Floor with its top at y = 0
        level.world.add_box(
            Vec2::new(0.0, -0.5),
            Vec2::new(12.0, 0.5),
            Layers::SOLID,
            Surface::Solid,
        );

        // Walls at x = -12 and x = 12
        level.world.add_box(
            Vec2::new(-12.5, 5.0),
            Vec2::new(0.5, 5.5),
            Layers::SOLID,
            Surface::Solid,
        );
        level.world.add_box(
            Vec2::new(12.5, 5.0),
            Vec2::new(0.5, 5.5),
            Layers::SOLID,
            Surface::Solid,
        );

        // Gentle slope rising to the right, climbable at the default
        // 10 degree limit
        let gentle = 8f32.to_radians();
        level.world.add_slope(
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 0.0) + 6.0 * Vec2::new(gentle.cos(), gentle.sin()),
            Layers::SOLID,
            Surface::Solid,
        );

        // Steep slope on the left that forces a slide
        let steep = 60f32.to_radians();
        level.world.add_slope(
            Vec2::new(-4.0, 0.0),
            Vec2::new(-4.0, 0.0) + 5.0 * Vec2::new(-steep.cos(), steep.sin()),
            Layers::SOLID,
            Surface::Solid,
        );

        // One-way ledge above the floor
        level.world.add_box(
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.1),
            Layers::SOLID,
            Surface::PassThrough,
        );

        // Moving platform shuttling sideways above the ledge
        let platform = PlatformController::new(
            &mut level.world,
            Vec2::new(-2.0, 4.0),
            Vec2::new(1.5, 0.25),
            PlatformConfig {
                local_waypoints: vec![Vec2::ZERO, Vec2::new(4.0, 0.0)],
                speed: 1.5,
                cyclic: false,
                wait_time: 0.3,
                ..PlatformConfig::default()
            },
        )
        .expect("test arena platform config is valid");
        level.platforms.push(platform);

        level.spawn_points.push(Vec2::new(0.0, 0.5));
        level.spawn_points.push(Vec2::new(2.0, 0.5));

        level
    }

    /// Get a spawn point, falling back to the origin.
    pub fn spawn(&self, index: usize) -> Vec2 {
        self.spawn_points.get(index).copied().unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_level() {
        let level = Level::new("empty");
        assert_eq!(level.name, "empty");
        assert_eq!(level.world.brush_count(), 0);
        assert_eq!(level.spawn(0), Vec2::ZERO);
    }

    #[test]
    fn test_test_arena_contents() {
        let level = Level::test_arena();
        assert!(level.world.brush_count() >= 6);
        assert_eq!(level.platforms.len(), 1);
        assert!(level.spawn_points.len() >= 2);

        // The floor is really there.
        let hit = level
            .world
            .raycast(Vec2::new(0.0, 1.0), -Vec2::Y, 5.0, Layers::SOLID)
            .unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-5);
    }
}
