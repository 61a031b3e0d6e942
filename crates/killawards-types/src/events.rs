//! Inbound events delivered by the host environment.

use serde::{Deserialize, Serialize};

use crate::enums::Victim;
use crate::ids::ActorId;

/// A single death reported by the host.
///
/// Delivered once per death. `killer` is the actor credited with the kill,
/// or `None` when the death had no attributable killer (fall damage,
/// environment, suicide by console).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEvent {
    /// The entity that died.
    pub victim: Victim,
    /// The actor credited with the kill.
    #[serde(default)]
    pub killer: Option<ActorId>,
}

impl DeathEvent {
    /// Build a death event for the given victim and killer.
    pub const fn new(victim: Victim, killer: Option<ActorId>) -> Self {
        Self { victim, killer }
    }
}
