//! Bramble Physics
//!
//! A kinematic 2D physics engine for platformer characters and moving
//! platforms, built on axis-aligned boxes and discrete raycasts rather than
//! a general rigid-body solver.
//!
//! # Architecture
//!
//! The engine is split into three systems:
//!
//! - **Collision**: a flat world of brushes (boxes and slope segments) with
//!   a nearest-hit raycast primitive filtered by layer masks
//! - **Movement**: the kinematic body-motion resolver — horizontal and
//!   vertical ray sweeps, slope climbing/descending, one-way platforms
//! - **Platform**: waypoint-driven moving platforms that detect and carry
//!   passenger bodies through the same raycast substrate
//!
//! # Design Principles
//!
//! 1. **Determinism**: one single-threaded resolution pass per tick; the
//!    same inputs always produce the same displacements
//! 2. **No tunneling**: every clamp is derived from a ray hit, never from
//!    penetration recovery
//! 3. **Explicit state**: the per-tick contact record is reset and rebuilt
//!    inside every move call and readable afterwards

pub mod collision;
pub mod movement;
pub mod platform;

// Re-export commonly used types
pub use collision::{Aabb, BrushId, CollisionWorld, Layers, RayHit, Shape, Surface};
pub use movement::{BodyConfig, CollisionState, ConfigError, KinematicBody};
pub use platform::{PassengerId, PassengerRegistry, PlatformConfig, PlatformController};
