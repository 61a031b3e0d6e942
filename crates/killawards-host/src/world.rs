//! In-memory world that stands in for a game server.
//!
//! [`SimulatedWorld`] holds the actors from a scenario and applies the
//! service's reward actions to them. Notifications and commands are only
//! logged and recorded; nothing is executed.

use std::collections::{BTreeMap, BTreeSet};

use killawards_core::{
    ActorProfile, AmmoRefill, CommandTarget, GearProvisioner, HostError, RewardHost, TeamDirectory,
};
use killawards_types::{ActorId, Notification, Position};
use tracing::{debug, info};

use crate::scenario::{ActorSpec, Scenario, WeaponSpec};

/// Live state of one simulated actor.
#[derive(Debug, Clone, PartialEq)]
pub struct SimActor {
    /// Display name.
    pub name: String,
    /// Position in world space.
    pub position: Position,
    /// Map grid cell.
    pub grid: String,
    /// Team number.
    pub team: Option<u32>,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Held weapon.
    pub weapon: Option<WeaponSpec>,
    /// Notification texts delivered, oldest first.
    pub inbox: Vec<String>,
}

impl From<ActorSpec> for SimActor {
    fn from(spec: ActorSpec) -> Self {
        Self {
            name: spec.name,
            position: spec.position,
            grid: spec.grid,
            team: spec.team,
            health: spec.health.min(spec.max_health),
            max_health: spec.max_health,
            weapon: spec.weapon,
            inbox: Vec::new(),
        }
    }
}

/// Simulated gear provisioning collaborator.
#[derive(Debug, Clone, Default)]
pub struct SimGear {
    known_sets: BTreeSet<String>,
    equipped: Vec<(ActorId, String)>,
}

impl SimGear {
    /// A collaborator that knows the given gear sets.
    pub fn new(known_sets: impl IntoIterator<Item = String>) -> Self {
        Self {
            known_sets: known_sets.into_iter().collect(),
            equipped: Vec::new(),
        }
    }

    /// Every successful grant, in order.
    pub fn equipped(&self) -> &[(ActorId, String)] {
        &self.equipped
    }
}

impl GearProvisioner for SimGear {
    fn equip(
        &mut self,
        actor: ActorId,
        gear_set: &str,
        clear_inventory: bool,
    ) -> Result<bool, HostError> {
        if !self.known_sets.contains(gear_set) {
            debug!(%actor, gear_set, "Unknown gear set");
            return Ok(false);
        }
        info!(%actor, gear_set, clear_inventory, "Gear set equipped");
        self.equipped.push((actor, gear_set.to_owned()));
        Ok(true)
    }
}

/// The simulated world.
#[derive(Debug, Clone, Default)]
pub struct SimulatedWorld {
    actors: BTreeMap<ActorId, SimActor>,
    gear: Option<SimGear>,
    commands: Vec<(CommandTarget, String)>,
}

impl SimulatedWorld {
    /// Build a world from a scenario's actors and gear sets.
    ///
    /// When `gear_provisioning` is `false` the world behaves as if the gear
    /// collaborator is not installed.
    pub fn from_scenario(scenario: &Scenario, gear_provisioning: bool) -> Self {
        let actors = scenario
            .actors
            .iter()
            .cloned()
            .map(|spec| (spec.id, SimActor::from(spec)))
            .collect();
        let gear = gear_provisioning.then(|| SimGear::new(scenario.gear_sets.iter().cloned()));
        Self {
            actors,
            gear,
            commands: Vec::new(),
        }
    }

    /// An actor's live state.
    pub fn actor(&self, id: ActorId) -> Option<&SimActor> {
        self.actors.get(&id)
    }

    /// Every actor, ordered by id.
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &SimActor)> {
        self.actors.iter().map(|(id, actor)| (*id, actor))
    }

    /// Every command executed, in order.
    pub fn commands(&self) -> &[(CommandTarget, String)] {
        &self.commands
    }

    /// The gear collaborator, if installed.
    pub const fn gear(&self) -> Option<&SimGear> {
        self.gear.as_ref()
    }

    /// Restore a dead actor to full health.
    pub fn respawn(&mut self, id: ActorId) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.health = actor.max_health;
            debug!(actor = %id, "Respawned");
        }
    }

    fn actor_mut(&mut self, id: ActorId) -> Result<&mut SimActor, HostError> {
        self.actors
            .get_mut(&id)
            .ok_or(HostError::ActorUnavailable { actor: id })
    }
}

impl TeamDirectory for SimulatedWorld {
    fn are_teammates(&self, first: ActorId, second: ActorId) -> bool {
        let team_of = |id: ActorId| self.actors.get(&id).and_then(|actor| actor.team);
        matches!((team_of(first), team_of(second)), (Some(a), Some(b)) if a == b)
    }
}

impl RewardHost for SimulatedWorld {
    fn profile(&self, actor: ActorId) -> Result<ActorProfile, HostError> {
        let sim = self
            .actors
            .get(&actor)
            .ok_or(HostError::ActorUnavailable { actor })?;
        Ok(ActorProfile {
            name: sim.name.clone(),
            position: sim.position,
            grid: sim.grid.clone(),
        })
    }

    fn heal(&mut self, actor: ActorId, amount: f32) -> Result<(), HostError> {
        let sim = self.actor_mut(actor)?;
        sim.health = (sim.health + amount).min(sim.max_health);
        debug!(%actor, amount, health = sim.health, "Healed");
        Ok(())
    }

    fn top_up_ammo(&mut self, actor: ActorId) -> Result<AmmoRefill, HostError> {
        let sim = self.actor_mut(actor)?;
        Ok(match sim.weapon.as_mut() {
            Some(weapon) => {
                weapon.magazine = weapon.capacity;
                AmmoRefill::Refilled {
                    capacity: weapon.capacity,
                }
            }
            None => AmmoRefill::NoWeapon,
        })
    }

    fn notify(&mut self, actor: ActorId, notification: &Notification) -> Result<(), HostError> {
        let sim = self.actor_mut(actor)?;
        let text = notification.default_text();
        info!(%actor, key = notification.key(), text = %text, "Notification");
        sim.inbox.push(text);
        Ok(())
    }

    fn run_command(&mut self, target: CommandTarget, command: &str) -> Result<(), HostError> {
        if let CommandTarget::Client(actor) = target {
            self.actor_mut(actor)?;
        }
        info!(?target, command, "Command");
        self.commands.push((target, command.to_owned()));
        Ok(())
    }

    fn gear_provisioner(&mut self) -> Option<&mut dyn GearProvisioner> {
        self.gear
            .as_mut()
            .map(|gear| gear as &mut dyn GearProvisioner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const ALICE: ActorId = ActorId(76_561_198_000_000_001);
    const BOB: ActorId = ActorId(76_561_198_000_000_002);
    const CAROL: ActorId = ActorId(76_561_198_000_000_003);

    fn world(gear: bool) -> SimulatedWorld {
        let scenario = Scenario::parse(
            r#"{
                "actors": [
                    { "id": 76561198000000001, "name": "Alice", "team": 1, "health": 50.0,
                      "weapon": { "magazine": 0, "capacity": 24 } },
                    { "id": 76561198000000002, "name": "Bob", "team": 1 },
                    { "id": 76561198000000003, "name": "Carol" }
                ],
                "gearSets": ["raider"]
            }"#,
        )
        .unwrap();
        SimulatedWorld::from_scenario(&scenario, gear)
    }

    #[test]
    fn teams_are_symmetric_and_need_a_number() {
        let world = world(true);
        assert!(world.are_teammates(ALICE, BOB));
        assert!(world.are_teammates(BOB, ALICE));
        assert!(!world.are_teammates(ALICE, CAROL));
        assert!(!world.are_teammates(CAROL, CAROL));
    }

    #[test]
    fn heal_is_capped_at_max_health() {
        let mut world = world(true);
        world.heal(ALICE, 30.0).unwrap();
        assert_eq!(world.actor(ALICE).unwrap().health, 80.0);
        world.heal(ALICE, 30.0).unwrap();
        assert_eq!(world.actor(ALICE).unwrap().health, 100.0);
    }

    #[test]
    fn ammo_fills_magazine_or_reports_no_weapon() {
        let mut world = world(true);
        assert_eq!(
            world.top_up_ammo(ALICE).unwrap(),
            AmmoRefill::Refilled { capacity: 24 }
        );
        assert_eq!(
            world.actor(ALICE).unwrap().weapon.as_ref().unwrap().magazine,
            24
        );
        assert_eq!(world.top_up_ammo(BOB).unwrap(), AmmoRefill::NoWeapon);
    }

    #[test]
    fn unknown_actor_is_unavailable() {
        let mut world = world(true);
        let stranger = ActorId(76_561_198_000_000_099);
        assert!(matches!(
            world.heal(stranger, 10.0),
            Err(HostError::ActorUnavailable { .. })
        ));
        assert!(world.profile(stranger).is_err());
        assert!(world
            .run_command(CommandTarget::Client(stranger), "chat.say \"hi\"")
            .is_err());
    }

    #[test]
    fn gear_collaborator_can_be_absent() {
        let mut absent = world(false);
        assert!(absent.gear_provisioner().is_none());

        let mut present = world(true);
        let gear = present.gear_provisioner().unwrap();
        assert!(gear.equip(ALICE, "raider", true).unwrap());
        assert!(!gear.equip(ALICE, "unknown", true).unwrap());
        assert_eq!(present.gear().unwrap().equipped().len(), 1);
    }

    #[test]
    fn notifications_land_in_inbox() {
        let mut world = world(true);
        world.notify(BOB, &Notification::AmmoRefilled).unwrap();
        assert_eq!(world.actor(BOB).unwrap().inbox.len(), 1);
    }

    #[test]
    fn respawn_restores_health() {
        let mut world = world(true);
        world.respawn(ALICE);
        assert_eq!(world.actor(ALICE).unwrap().health, 100.0);
    }
}
