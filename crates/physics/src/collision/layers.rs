//! Layer masks and surface tags for raycast filtering.

use serde::{Deserialize, Serialize};

/// Bitmask of collision layers.
///
/// Every brush occupies one or more layers; every raycast carries a mask of
/// the layers it wants to hit. Bodies cast against solid geometry while
/// platforms scan a separate passenger layer, so the two never confuse each
/// other's queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Layers(pub u32);

impl Layers {
    /// No layers - matches nothing.
    pub const EMPTY: Self = Self(0);

    /// Static and moving level geometry - floors, walls, slopes, platforms.
    pub const SOLID: Self = Self(1 << 0);

    /// Kinematic bodies that moving platforms may pick up as passengers.
    pub const PASSENGER: Self = Self(1 << 1);

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Check if all of the given layers are set.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Combine two layer sets.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Layers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Layers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Surface tag carried by a brush and echoed in ray hits.
///
/// `PassThrough` marks one-way platform geometry: the vertical sweep ignores
/// it when moving upward, when already embedded, and during the timed
/// post-drop grace window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Surface {
    /// Ordinary solid surface.
    #[default]
    Solid,
    /// One-way platform surface, approachable from below.
    PassThrough,
}
