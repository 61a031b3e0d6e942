//! Shared type definitions for the KillAwards milestone rewards engine.
//!
//! This crate is the single source of truth for the documents and events
//! exchanged between the rules engine and its host. It carries no I/O;
//! everything here is plain data with serde derives.
//!
//! # Modules
//!
//! - [`ids`] -- Actor identity and world position
//! - [`enums`] -- Command sink kinds and victim classification
//! - [`structs`] -- Configuration and persisted counter documents
//! - [`events`] -- Inbound death events delivered by the host
//! - [`notification`] -- Player-facing reward notifications

pub mod enums;
pub mod events;
pub mod ids;
pub mod notification;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CommandKind, Victim};
pub use events::DeathEvent;
pub use ids::{ActorId, Position};
pub use notification::Notification;
pub use structs::{
    ActorRecord, CommandSpec, Configuration, LegacyPersistedState, PersistedState,
    RewardDefinition,
};
