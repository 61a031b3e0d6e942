//! Traits the host environment implements.
//!
//! The engine never touches actors directly. Healing, ammo, notifications,
//! command execution, and team lookups all go through [`RewardHost`]; gear
//! grants go through an optional [`GearProvisioner`] that may not be
//! loaded at all.

use killawards_types::{ActorId, Notification, Position};

use crate::eligibility::TeamDirectory;

/// Errors reported by the host for a single action.
///
/// The dispatcher logs these and moves on to the next action.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The actor is no longer present (disconnected, despawned).
    #[error("actor {actor} is not available")]
    ActorUnavailable {
        /// The missing actor.
        actor: ActorId,
    },

    /// The host refused or failed the action.
    #[error("host rejected {action}: {message}")]
    Rejected {
        /// Which action failed.
        action: &'static str,
        /// Description of the failure.
        message: String,
    },
}

/// Identity and location details used to fill command templates.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorProfile {
    /// Display name.
    pub name: String,
    /// Current position.
    pub position: Position,
    /// Map grid cell containing `position`, e.g. `G12`.
    pub grid: String,
}

/// Outcome of an ammo refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmoRefill {
    /// The held weapon's magazine was filled to `capacity`.
    Refilled {
        /// Magazine capacity after the refill.
        capacity: u32,
    },
    /// The actor holds no weapon with a magazine.
    NoWeapon,
}

/// Where a rendered command is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTarget {
    /// The server console.
    Server,
    /// The given actor's client console.
    Client(ActorId),
}

/// The host environment as seen by the reward dispatcher.
pub trait RewardHost: TeamDirectory {
    /// Name and location of `actor`.
    fn profile(&self, actor: ActorId) -> Result<ActorProfile, HostError>;

    /// Restore `amount` health to `actor`.
    fn heal(&mut self, actor: ActorId, amount: f32) -> Result<(), HostError>;

    /// Fill the magazine of the ranged weapon `actor` is holding.
    fn top_up_ammo(&mut self, actor: ActorId) -> Result<AmmoRefill, HostError>;

    /// Deliver a notification to `actor`.
    fn notify(&mut self, actor: ActorId, notification: &Notification) -> Result<(), HostError>;

    /// Execute a console command.
    fn run_command(&mut self, target: CommandTarget, command: &str) -> Result<(), HostError>;

    /// The gear provisioning collaborator, if it is loaded.
    fn gear_provisioner(&mut self) -> Option<&mut dyn GearProvisioner> {
        None
    }
}

/// External service that hands out named gear sets.
pub trait GearProvisioner {
    /// Equip `gear_set` on `actor`, optionally clearing the inventory first.
    ///
    /// Returns `Ok(false)` when the collaborator declined (unknown set,
    /// actor not eligible).
    fn equip(
        &mut self,
        actor: ActorId,
        gear_set: &str,
        clear_inventory: bool,
    ) -> Result<bool, HostError>;
}
