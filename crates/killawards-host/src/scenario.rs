//! Scenario files replayed by the host.
//!
//! A scenario lists the actors in the simulated world, the gear sets the
//! simulated provisioning collaborator knows, and the ordered events to
//! feed into the service.

use std::path::Path;

use killawards_core::HostEvent;
use killawards_types::{ActorId, DeathEvent, Position};
use serde::Deserialize;

use crate::error::HostAppError;

/// A complete scenario document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Actors present in the world.
    #[serde(default)]
    pub actors: Vec<ActorSpec>,

    /// Gear sets the simulated collaborator can hand out.
    #[serde(default)]
    pub gear_sets: Vec<String>,

    /// Events in delivery order.
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`HostAppError::Scenario`] if the file cannot be read or
    /// parsed.
    pub fn from_file(path: &Path) -> Result<Self, HostAppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| HostAppError::Scenario {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`HostAppError::Scenario`] if the string is not a valid
    /// scenario.
    pub fn parse(json: &str) -> Result<Self, HostAppError> {
        serde_json::from_str(json).map_err(|e| HostAppError::Scenario {
            message: format!("failed to parse scenario JSON: {e}"),
        })
    }
}

/// An actor in the simulated world.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSpec {
    /// Platform account id.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Position in world space.
    #[serde(default)]
    pub position: Position,
    /// Map grid cell.
    #[serde(default)]
    pub grid: String,
    /// Team number; actors sharing a number are teammates.
    #[serde(default)]
    pub team: Option<u32>,
    /// Current health.
    #[serde(default = "default_health")]
    pub health: f32,
    /// Maximum health.
    #[serde(default = "default_health")]
    pub max_health: f32,
    /// The ranged weapon held, if any.
    #[serde(default)]
    pub weapon: Option<WeaponSpec>,
}

/// A held ranged weapon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponSpec {
    /// Rounds currently loaded.
    pub magazine: u32,
    /// Magazine capacity.
    pub capacity: u32,
}

/// One scripted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScenarioEvent {
    /// An entity dies.
    Death(DeathEvent),
    /// The world is wiped.
    WorldReset,
    /// The configuration is re-read.
    ReloadConfig,
}

impl From<ScenarioEvent> for HostEvent {
    fn from(event: ScenarioEvent) -> Self {
        match event {
            ScenarioEvent::Death(death) => Self::Death(death),
            ScenarioEvent::WorldReset => Self::WorldReset,
            ScenarioEvent::ReloadConfig => Self::ReloadConfig,
        }
    }
}

const fn default_health() -> f32 {
    100.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use killawards_types::Victim;

    use super::*;

    #[test]
    fn parse_scenario() {
        let json = r#"{
            "actors": [
                { "id": 76561198000000001, "name": "Alice", "grid": "D4", "team": 1,
                  "health": 40.0, "weapon": { "magazine": 3, "capacity": 30 } },
                { "id": 76561198000000002, "name": "Bob" }
            ],
            "gearSets": ["raider"],
            "events": [
                { "type": "death", "victim": { "kind": "actor", "id": 76561198000000002 },
                  "killer": 76561198000000001 },
                { "type": "death", "victim": { "kind": "wildlife" }, "killer": 76561198000000001 },
                { "type": "worldReset" },
                { "type": "reloadConfig" }
            ]
        }"#;

        let scenario = Scenario::parse(json).unwrap();
        assert_eq!(scenario.actors.len(), 2);
        assert_eq!(scenario.actors[1].max_health, 100.0);
        assert_eq!(scenario.actors[0].weapon.as_ref().map(|w| w.capacity), Some(30));
        assert_eq!(scenario.gear_sets, vec!["raider".to_owned()]);

        let events: Vec<HostEvent> = scenario.events.into_iter().map(HostEvent::from).collect();
        assert_eq!(
            events[0],
            HostEvent::Death(DeathEvent::new(
                Victim::Actor {
                    id: ActorId(76_561_198_000_000_002),
                    npc: false
                },
                Some(ActorId(76_561_198_000_000_001)),
            ))
        );
        assert_eq!(events[2], HostEvent::WorldReset);
        assert_eq!(events[3], HostEvent::ReloadConfig);
    }

    #[test]
    fn rejects_unknown_event_type() {
        let json = r#"{ "events": [ { "type": "explode" } ] }"#;
        assert!(matches!(
            Scenario::parse(json),
            Err(HostAppError::Scenario { .. })
        ));
    }
}
