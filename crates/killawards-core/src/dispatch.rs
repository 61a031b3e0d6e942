//! Ordered execution of a reward's actions.
//!
//! Actions always run in the same order: heal, ammo refill, gear grant,
//! then each command in list order. Every action is isolated: a failure is
//! logged and the next action still runs. Nothing is retried or rolled back.

use killawards_types::{ActorId, CommandKind, CommandSpec, Notification, RewardDefinition};
use tracing::{debug, info, warn};

use crate::host::{AmmoRefill, CommandTarget, HostError, RewardHost};
use crate::template::{self, TemplateContext};

/// Gear sets replace whatever the actor is carrying.
const CLEAR_INVENTORY_ON_GEAR: bool = true;

/// Run every action of `reward` for `actor`.
pub fn dispatch(host: &mut dyn RewardHost, actor: ActorId, reward: &RewardDefinition) {
    if reward.restores_health() {
        report(actor, "heal", restore_health(host, actor, reward.health_restored));
    }

    if reward.refill_ammo {
        report(actor, "refill_ammo", refill_ammo(host, actor));
    }

    if let Some(gear_set) = reward.gear_set() {
        report(actor, "gear_set", grant_gear(host, actor, gear_set));
    }

    if !reward.commands.is_empty() {
        run_commands(host, actor, &reward.commands);
    }

    info!(
        actor = %actor,
        health = reward.health_restored,
        ammo = reward.refill_ammo,
        gear_set = reward.gear_set().unwrap_or_default(),
        commands = reward.commands.len(),
        "Reward dispatched"
    );
}

fn report(actor: ActorId, action: &'static str, result: Result<(), HostError>) {
    if let Err(e) = result {
        warn!(actor = %actor, action, error = %e, "Reward action failed");
    }
}

fn restore_health(host: &mut dyn RewardHost, actor: ActorId, amount: f32) -> Result<(), HostError> {
    host.heal(actor, amount)?;
    host.notify(actor, &Notification::HealthRestored { amount })
}

fn refill_ammo(host: &mut dyn RewardHost, actor: ActorId) -> Result<(), HostError> {
    match host.top_up_ammo(actor)? {
        AmmoRefill::Refilled { capacity } => debug!(actor = %actor, capacity, "Magazine refilled"),
        AmmoRefill::NoWeapon => debug!(actor = %actor, "No ranged weapon held, nothing to refill"),
    }
    host.notify(actor, &Notification::AmmoRefilled)
}

fn grant_gear(host: &mut dyn RewardHost, actor: ActorId, gear_set: &str) -> Result<(), HostError> {
    let equipped = match host.gear_provisioner() {
        Some(provisioner) => provisioner.equip(actor, gear_set, CLEAR_INVENTORY_ON_GEAR)?,
        None => {
            debug!(actor = %actor, gear_set, "Gear provisioning not loaded, skipping");
            return Ok(());
        }
    };

    if !equipped {
        debug!(actor = %actor, gear_set, "Gear provisioning declined");
        return Ok(());
    }

    host.notify(
        actor,
        &Notification::GearSetGiven {
            name: gear_set.to_owned(),
        },
    )
}

fn run_commands(host: &mut dyn RewardHost, actor: ActorId, commands: &[CommandSpec]) {
    let profile = match host.profile(actor) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!(
                actor = %actor,
                error = %e,
                "Actor profile unavailable, commands with placeholders will be skipped"
            );
            None
        }
    };

    for command in commands {
        let rendered = match &profile {
            Some(profile) => template::render(
                &command.template,
                &TemplateContext {
                    actor,
                    name: &profile.name,
                    position: profile.position,
                    grid: &profile.grid,
                },
            ),
            None if template::has_placeholders(&command.template) => {
                warn!(
                    actor = %actor,
                    action = command.kind.as_str(),
                    "Command needs the actor profile, skipped"
                );
                continue;
            }
            None => command.template.clone(),
        };

        let result = match command.kind {
            CommandKind::ChatMessage => {
                host.run_command(CommandTarget::Client(actor), &template::chat_command(&rendered))
            }
            CommandKind::ClientConsole => host.run_command(CommandTarget::Client(actor), &rendered),
            CommandKind::ServerConsole => host.run_command(CommandTarget::Server, &rendered),
        };
        report(actor, command.kind.as_str(), result);
    }
}
