//! Milestone rules engine for the KillAwards reward system.
//!
//! This crate owns the kill counter lifecycle: deciding which deaths count,
//! advancing and wrapping each actor's counter, resolving the reward for the
//! milestone reached, and dispatching that reward's actions through the host.
//!
//! # Modules
//!
//! - [`config`] -- Configuration schema defaults, validation, and migration.
//! - [`storage`] -- [`DocumentStore`] trait with filesystem and in-memory
//!   backends.
//! - [`store`] -- Persistent per-actor counter store.
//! - [`eligibility`] -- Which deaths count as qualifying kills.
//! - [`engine`] -- Counter advance, wrap policy, and reward resolution.
//! - [`template`] -- Placeholder substitution for reward commands.
//! - [`host`] -- Traits the host environment implements.
//! - [`dispatch`] -- Ordered execution of a reward's actions.
//! - [`service`] -- The [`KillAwards`] context object and its inbound
//!   event interface.
//! - [`error`] -- Top-level [`ServiceError`].
//!
//! [`DocumentStore`]: storage::DocumentStore
//! [`KillAwards`]: service::KillAwards
//! [`ServiceError`]: error::ServiceError

pub mod config;
pub mod dispatch;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod host;
pub mod service;
pub mod storage;
pub mod store;
pub mod template;

// Re-export primary types at crate root for convenience.
pub use config::{ConfigError, LoadedConfig, MigrationOutcome, SCHEMA_VERSION, SYSTEM_NAME};
pub use eligibility::{Eligibility, TeamDirectory};
pub use engine::KillTally;
pub use error::ServiceError;
pub use host::{ActorProfile, AmmoRefill, CommandTarget, GearProvisioner, HostError, RewardHost};
pub use service::{DeathOutcome, HandleOutcome, HostEvent, KillAwards};
pub use storage::{DocumentStore, FsDocumentStore, MemoryDocumentStore, StorageError};
pub use store::{CounterStore, StoreError};
