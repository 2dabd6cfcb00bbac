//! The fixed-timestep simulation loop.
//!
//! Owns the clock, the level, and the players, and sequences one tick:
//! moving platforms first (relocating their passengers through the body
//! resolver), then each player consuming its own input. Everything runs on
//! a single thread; the clock value handed down as `now` is the only
//! time source, so the drop-through grace window and platform wait timers
//! cannot race the tick that reads them.

use bramble_physics::{
    BodyConfig, CollisionWorld, ConfigError, KinematicBody, PassengerId, PassengerRegistry,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::PlayerInput;
use crate::level::Level;
use crate::player::{Player, PlayerTuning};

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Body configuration applied to spawned players.
    pub body: BodyConfig,

    /// Half-extents of a player's collision box.
    pub player_half_extents: Vec2,

    /// Movement-feel tuning applied to spawned players.
    pub player: PlayerTuning,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            body: BodyConfig::default(),
            player_half_extents: Vec2::new(0.35, 0.5),
            player: PlayerTuning::default(),
        }
    }
}

impl SimulationConfig {
    /// Time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// The running simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current tick number.
    pub frame: u64,

    pub config: SimulationConfig,
    pub level: Level,
    pub players: Vec<Player>,

    clock: f32,
    next_passenger_id: u32,
}

/// Adapter exposing the simulation's player slice through the physics
/// `PassengerRegistry` interface. A local newtype is required because the
/// orphan rule forbids implementing the foreign trait directly on
/// `Vec<Player>`.
struct Passengers<'a>(&'a mut [Player]);

impl PassengerRegistry for Passengers<'_> {
    fn move_passenger(
        &mut self,
        world: &mut CollisionWorld,
        passenger: PassengerId,
        amount: Vec2,
        standing_on_platform: bool,
        now: f32,
    ) -> bool {
        match self.0.iter_mut().find(|p| p.id == passenger) {
            Some(player) => {
                player
                    .body
                    .move_by(world, amount, Vec2::ZERO, standing_on_platform, now);
                true
            }
            None => false,
        }
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig, level: Level) -> Self {
        Self {
            frame: 0,
            config,
            level,
            players: Vec::new(),
            clock: 0.0,
            next_passenger_id: 0,
        }
    }

    /// Simulation with default configuration and the test arena.
    pub fn test() -> Self {
        Self::new(SimulationConfig::default(), Level::test_arena())
    }

    /// Spawn a player at the given spawn point and register it with every
    /// platform as a potential passenger.
    pub fn add_player(&mut self, spawn_index: usize) -> Result<PassengerId, ConfigError> {
        let id = PassengerId(self.next_passenger_id);
        self.next_passenger_id += 1;

        let spawn = self.level.spawn(spawn_index);
        let body = KinematicBody::new(
            &mut self.level.world,
            spawn,
            self.config.player_half_extents,
            self.config.body.clone(),
        )?;

        for platform in &mut self.level.platforms {
            platform.register_passenger(body.brush(), id);
        }

        self.players
            .push(Player::new(id, body, self.config.player.clone()));
        Ok(id)
    }

    /// Remove a player and its collision brush.
    pub fn remove_player(&mut self, id: PassengerId) {
        if let Some(index) = self.players.iter().position(|p| p.id == id) {
            let player = self.players.remove(index);
            for platform in &mut self.level.platforms {
                platform.unregister_passenger(player.body.brush());
            }
            player.body.remove(&mut self.level.world);
        }
    }

    pub fn get_player(&self, id: PassengerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Simulation time in seconds.
    pub fn now(&self) -> f32 {
        self.clock
    }

    /// Advance the simulation by one tick.
    ///
    /// `inputs` are indexed by player position in the `players` array;
    /// missing entries default to no input.
    pub fn tick(&mut self, inputs: &[PlayerInput]) {
        let dt = self.config.delta_time();
        let now = self.clock;

        // Platforms move first so riders' collision state reflects the
        // surface they are standing on when their own input applies.
        {
            let Level {
                world, platforms, ..
            } = &mut self.level;
            for platform in platforms.iter_mut() {
                platform.update(world, &mut Passengers(&mut self.players), dt, now);
            }
        }

        for (i, player) in self.players.iter_mut().enumerate() {
            let input = inputs.get(i).copied().unwrap_or_default();

            player.set_directional_input(input.axes());
            if input.jump_pressed {
                player.on_jump_pressed();
            }
            if input.jump_released {
                player.on_jump_released();
            }
            player.update(&mut self.level.world, dt, now);
        }

        self.clock += dt;
        self.frame += 1;
    }
}

// ============================================================================
// Tests
// ============================================================================
