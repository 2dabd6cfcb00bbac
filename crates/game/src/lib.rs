//! Bramble Game Logic
//!
//! The layer that drives the physics core:
//!
//! - Player state and input handling (the "motivator" that turns input and
//!   gravity into per-tick displacements)
//! - Level assembly (geometry, one-way ledges, moving platforms, spawns)
//! - A fixed-timestep simulation loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation tick                       │
//! │  ┌────────┐   ┌─────────────┐   ┌──────────────────────────┐ │
//! │  │ Input  │──►│ Player      │──►│ bramble-physics          │ │
//! │  │        │   │ (velocity,  │   │ (sweeps, slopes,         │ │
//! │  └────────┘   │  jumps)     │   │  platforms)              │ │
//! │               └─────▲───────┘   └───────────┬──────────────┘ │
//! │                     └── collision state ────┘                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Platforms update (and relocate their passengers) before players consume
//! their own input, so a rider's collision state reflects the platform it
//! is standing on.

pub mod input;
pub mod level;
pub mod player;
pub mod simulation;

// Re-export main types
pub use input::PlayerInput;
pub use level::Level;
pub use player::{Player, PlayerTuning};
pub use simulation::{Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use bramble_physics::{
    BodyConfig, CollisionState, CollisionWorld, KinematicBody, Layers, PlatformController, Surface,
};
