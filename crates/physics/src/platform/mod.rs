//! Waypoint-driven moving platforms.
//!
//! A platform follows an ordered waypoint path (cyclic or ping-pong, with
//! easing and per-waypoint wait times) and carries whatever bodies it finds
//! riding on, pressed against, or standing in its way. Detection runs
//! through the same corner-anchored raycasts the bodies themselves use,
//! against a dedicated passenger layer.
//!
//! # Sequencing
//!
//! Passengers are moved in two batches around the platform's own
//! translation, so a platform moving up lifts its riders before it arrives
//! and a platform moving down relocates them after it has left. Each body
//! is moved by at most one detection sweep per tick.

mod path;
mod transport;

pub use path::WaypointPath;
pub use transport::{
    PassengerId, PassengerMovement, PassengerRegistry, PlatformConfig, PlatformController,
};
