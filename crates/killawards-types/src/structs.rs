//! Configuration and persisted counter documents.
//!
//! Both documents are JSON and meant to be edited by server operators, so
//! field names are fixed here and never derived from Rust identifiers at
//! runtime. Older releases wrote spaced, title-case keys; those are
//! accepted as aliases on decode and replaced by the canonical camelCase
//! keys the next time the document is written.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::CommandKind;
use crate::ids::ActorId;

// ---------------------------------------------------------------------------
// Configuration document
// ---------------------------------------------------------------------------

/// The reward configuration document.
///
/// Loaded once at startup, migrated when its schema version is stale, and
/// treated as immutable until the operator asks for a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Semantic version of the schema this document was written for.
    #[serde(default = "unversioned", alias = "Version")]
    pub schema_version: String,

    /// Count kills of non-player-controlled actors.
    #[serde(default, alias = "Include NPC Kills")]
    pub include_non_actor_kills: bool,

    /// Count kills of animals.
    #[serde(default, alias = "Include Animal Kills")]
    pub include_wildlife_kills: bool,

    /// Do not count kills of the killer's own teammates.
    #[serde(default = "enabled", alias = "Ignore Teammate Kills")]
    pub ignore_teammate_kills: bool,

    /// Reset an actor's counter to zero when the actor dies.
    #[serde(default = "enabled", alias = "Reset Milestone On Death")]
    pub reset_counter_on_death: bool,

    /// Milestone number to reward. The highest key is the wrap boundary.
    #[serde(default, alias = "Kill Milestones")]
    pub milestones: BTreeMap<u32, RewardDefinition>,
}

impl Configuration {
    /// The highest configured milestone, or `None` when no milestones exist.
    pub fn max_milestone(&self) -> Option<u32> {
        self.milestones.keys().next_back().copied()
    }
}

/// The bundle of actions fired when an actor reaches a milestone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDefinition {
    /// Health points restored. Zero disables the action.
    #[serde(default, alias = "Amount Of Health Restored")]
    pub health_restored: f32,

    /// Refill the magazine of the actor's held weapon.
    #[serde(default, alias = "Refill Weapon Ammo")]
    pub refill_ammo: bool,

    /// Gear set handed out by the provisioning collaborator. Empty or absent
    /// disables the action.
    #[serde(
        default,
        alias = "Gear Set To Equip",
        skip_serializing_if = "Option::is_none"
    )]
    pub gear_set_name: Option<String>,

    /// Commands run in list order.
    #[serde(default, alias = "Commands To Run", deserialize_with = "null_as_empty")]
    pub commands: Vec<CommandSpec>,
}

impl RewardDefinition {
    /// Whether the heal action should run.
    pub fn restores_health(&self) -> bool {
        self.health_restored > 0.0
    }

    /// The gear set to grant, ignoring empty names.
    pub fn gear_set(&self) -> Option<&str> {
        self.gear_set_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A templated command attached to a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    /// The sink that receives the command.
    #[serde(alias = "Type")]
    pub kind: CommandKind,

    /// Command text with `{PlayerId}`-style placeholders.
    #[serde(alias = "Command")]
    pub template: String,
}

impl CommandSpec {
    /// Create a command for the given sink.
    pub fn new(kind: CommandKind, template: impl Into<String>) -> Self {
        Self {
            kind,
            template: template.into(),
        }
    }
}

fn unversioned() -> String {
    "0.0.0".to_owned()
}

const fn enabled() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CommandSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CommandSpec>>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Persisted counter document
// ---------------------------------------------------------------------------

/// Per-actor counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRecord {
    /// Qualifying kills since the last wrap or reset.
    #[serde(default, alias = "Kills")]
    pub kill_count: u32,
}

/// Every tracked actor's counter, keyed by actor id at the top level of
/// the document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedState {
    /// Records for actors that have scored at least one qualifying kill.
    pub actors: BTreeMap<ActorId, ActorRecord>,
}

/// Counter document as written by the legacy plugin: the same records,
/// nested under a `Players` key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LegacyPersistedState {
    /// Records keyed by actor id.
    #[serde(rename = "Players")]
    pub players: BTreeMap<ActorId, ActorRecord>,
}

impl From<LegacyPersistedState> for PersistedState {
    fn from(legacy: LegacyPersistedState) -> Self {
        Self {
            actors: legacy.players,
        }
    }
}
