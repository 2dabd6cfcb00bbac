//! Kinematic body movement.
//!
//! This module implements the raycast-based motion resolver for platformer
//! bodies:
//!
//! - Horizontal and vertical ray sweeps that clamp a desired displacement
//!   against nearby geometry without tunneling
//! - Slope climbing, descending, and forced slides down too-steep inclines
//! - One-way platform pass-through with a timed post-drop grace window
//! - Contact flags (above/below/left/right) rebuilt every tick
//!
//! # Design
//!
//! A [`KinematicBody`] owns its position, ray spacing, and per-tick
//! [`CollisionState`]. Each `move_by` call resets the state, runs the sweep
//! passes in a fixed order (slope descent pre-processing, horizontal,
//! vertical, post-vertical slope correction), and applies whatever
//! displacement the geometry permitted. The resolution core itself is a
//! pure function over a borrowed [`SweepContext`], so it can be exercised
//! without a body.

mod config;
mod raycast;
mod slopes;
mod state;

pub mod body;

pub use body::{resolve, KinematicBody, SweepContext};
pub use config::{BodyConfig, ConfigError};
pub use raycast::{ray_origins, ray_spacing, RayOrigins, RaySpacing};
pub use state::{CollisionState, DROP_THROUGH_GRACE};
