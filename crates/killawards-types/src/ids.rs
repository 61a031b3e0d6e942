//! Actor identity and world position.
//!
//! Actors are identified by the host platform's 64-bit account id. Only ids
//! inside the platform's individual-account range are trackable; anything
//! below it belongs to scripted or spawned entities that never earn kills.

use serde::{Deserialize, Serialize};

/// Smallest id the platform hands out to real accounts. Ids at or below
/// this value are never trackable.
pub const ACCOUNT_ID_FLOOR: u64 = 76_561_197_960_265_728;

/// Stable identifier for an actor, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Return the raw numeric id.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Whether this id belongs to a real account whose kills can be counted.
    pub const fn is_trackable(self) -> bool {
        self.0 > ACCOUNT_ID_FLOOR
    }
}

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: f32,
    /// Height.
    pub y: f32,
    /// North-south coordinate.
    pub z: f32,
}

impl Position {
    /// Create a position from its three components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}
