//! Collision detection substrate for kinematic movement.
//!
//! This module provides the geometry the movement code casts rays against.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: flat list of brushes with a nearest-hit raycast
//! - [`Shape`]: brush geometry — axis-aligned box or slope segment
//! - [`Layers`] / [`Surface`]: filtering mask and the special surface tag
//!   honored by the vertical sweep (one-way platforms)
//!
//! # Raycast Contract
//!
//! `raycast(origin, dir, max_distance, mask)` returns the nearest hit with
//! its distance, point, and surface normal. A ray starting inside a brush
//! reports distance `0.0` with a zero normal; the movement code treats such
//! hits as already-embedded geometry and skips them.

mod layers;
mod shape;
mod world;

pub use layers::{Layers, Surface};
pub use shape::{Aabb, RayHit, Shape};
pub use world::{Brush, BrushId, CollisionWorld};
