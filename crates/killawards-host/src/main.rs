//! Scenario replay host for the KillAwards rewards engine.
//!
//! Stands in for a game server: it builds a simulated world from a
//! scenario file, starts the service against on-disk documents, and feeds
//! it every scripted event in order.
//!
//! # Startup Sequence
//!
//! 1. Load host settings from `killawards-host.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Read the scenario named on the command line
//! 4. Start the service (config load, migration, counter load)
//! 5. Replay events against the simulated world
//! 6. Log final standings

mod error;
mod scenario;
mod settings;
mod world;

use std::path::{Path, PathBuf};

use killawards_core::{FsDocumentStore, HandleOutcome, HostEvent, KillAwards};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::HostAppError;
use crate::scenario::Scenario;
use crate::settings::HostSettings;
use crate::world::SimulatedWorld;

/// Application entry point for the replay host.
///
/// # Errors
///
/// Returns an error if settings, the scenario, or the configuration
/// cannot be loaded, or if a world reset or reload fails.
fn main() -> Result<(), HostAppError> {
    // 1. Load settings.
    let settings = HostSettings::load(Path::new("killawards-host.yaml"))?;

    // 2. Initialize structured logging.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    if settings.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!(
        config_dir = %settings.config_dir.display(),
        data_dir = %settings.data_dir.display(),
        gear_provisioning = settings.gear_provisioning,
        "killawards-host starting"
    );

    // 3. Read the scenario.
    let scenario_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(HostAppError::Usage)?;
    let scenario = Scenario::from_file(&scenario_path)?;
    info!(
        actors = scenario.actors.len(),
        events = scenario.events.len(),
        "Scenario loaded"
    );

    // 4. Start the service.
    let mut service = KillAwards::start(
        Box::new(FsDocumentStore::new(settings.config_dir.clone())),
        Box::new(FsDocumentStore::new(settings.data_dir.clone())),
    )?;

    // 5. Replay.
    let mut world = SimulatedWorld::from_scenario(&scenario, settings.gear_provisioning);
    replay(&mut service, &mut world, scenario.events.into_iter().map(HostEvent::from))?;

    // 6. Final standings.
    for (id, actor) in world.actors() {
        info!(
            actor = %id,
            name = %actor.name,
            kill_count = service.kill_count(id),
            health = actor.health,
            notifications = actor.inbox.len(),
            "Final standing"
        );
    }
    info!(
        commands = world.commands().len(),
        gear_grants = world.gear().map_or(0, |gear| gear.equipped().len()),
        "killawards-host finished"
    );

    Ok(())
}

/// Feed every event to the service, respawning victims after each death.
fn replay(
    service: &mut KillAwards,
    world: &mut SimulatedWorld,
    events: impl IntoIterator<Item = HostEvent>,
) -> Result<(), HostAppError> {
    for (index, event) in events.into_iter().enumerate() {
        match service.handle(&event, world)? {
            HandleOutcome::Death(outcome) => {
                info!(
                    index,
                    verdict = outcome.eligibility.as_str(),
                    victim_reset = outcome.victim_reset,
                    kill_count = outcome.tally.map(|t| t.kill_count),
                    "Death handled"
                );
                if outcome.tally.is_some_and(|t| !t.persisted) {
                    warn!(index, "Counter change was not persisted");
                }
                if let HostEvent::Death(death) = event
                    && let Some(victim) = death.victim.actor_id()
                {
                    world.respawn(victim);
                }
            }
            HandleOutcome::WorldReset => info!(index, "World reset"),
            HandleOutcome::ConfigReloaded(migration) => {
                info!(index, ?migration, "Configuration reloaded");
            }
        }
    }
    Ok(())
}
