//! The KillAwards context object and its inbound event interface.
//!
//! [`KillAwards`] owns the running configuration and the counter store.
//! The host constructs it once at startup and hands every death, world
//! reset, and reload request to it, together with a [`RewardHost`] for the
//! side effects.
//!
//! Handling is synchronous and single-threaded: each call runs to
//! completion, including persistence, before it returns. A host that
//! delivers events from several threads must serialize calls, e.g. by
//! keeping the service behind one `Mutex`.

use killawards_types::{ActorId, Configuration, DeathEvent};
use tracing::{debug, info};

use crate::config::{self, MigrationOutcome};
use crate::dispatch;
use crate::eligibility::{self, Eligibility};
use crate::engine::{self, KillTally};
use crate::error::ServiceError;
use crate::host::RewardHost;
use crate::storage::DocumentStore;
use crate::store::CounterStore;

/// A message from the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// An entity died.
    Death(DeathEvent),
    /// A new world or save started; all counters are discarded.
    WorldReset,
    /// The operator asked for the configuration to be re-read.
    ReloadConfig,
}

/// What handling a death did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathOutcome {
    /// Whether the victim's own counter was reset.
    pub victim_reset: bool,
    /// The eligibility verdict for the killer.
    pub eligibility: Eligibility,
    /// The killer's counter change, when the kill qualified.
    pub tally: Option<KillTally>,
}

/// What handling a [`HostEvent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// A death was processed.
    Death(DeathOutcome),
    /// Every counter was discarded.
    WorldReset,
    /// The configuration was reloaded.
    ConfigReloaded(MigrationOutcome),
}

/// The running KillAwards instance.
#[derive(Debug)]
pub struct KillAwards {
    config: Configuration,
    config_documents: Box<dyn DocumentStore>,
    store: CounterStore,
}

impl KillAwards {
    /// Load configuration and counters and return a ready service.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if the configuration document is
    /// unreadable, malformed, or invalid. Counter problems are not errors;
    /// the store starts empty instead.
    pub fn start(
        config_documents: Box<dyn DocumentStore>,
        data_documents: Box<dyn DocumentStore>,
    ) -> Result<Self, ServiceError> {
        let loaded = config::load(config_documents.as_ref())?;
        let store = CounterStore::load_or_create(data_documents);

        info!(
            milestones = loaded.config.milestones.len(),
            tracked_actors = store.len(),
            "KillAwards started"
        );

        Ok(Self {
            config: loaded.config,
            config_documents,
            store,
        })
    }

    /// The configuration in effect.
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// The actor's current counter, zero if the actor has no record.
    pub fn kill_count(&self, actor: ActorId) -> u32 {
        self.store.kill_count(actor).unwrap_or(0)
    }

    /// The counter store.
    pub const fn store(&self) -> &CounterStore {
        &self.store
    }

    /// Handle one message from the host.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if a world reset cannot remove the counter
    /// document or a reload cannot load the configuration.
    pub fn handle(
        &mut self,
        event: &HostEvent,
        host: &mut dyn RewardHost,
    ) -> Result<HandleOutcome, ServiceError> {
        match event {
            HostEvent::Death(death) => Ok(HandleOutcome::Death(self.on_death(death, host))),
            HostEvent::WorldReset => {
                self.on_world_reset()?;
                Ok(HandleOutcome::WorldReset)
            }
            HostEvent::ReloadConfig => Ok(HandleOutcome::ConfigReloaded(self.reload_config()?)),
        }
    }

    /// Process a death: reset the victim if configured, then count and
    /// reward the killer if the kill qualifies.
    pub fn on_death(&mut self, event: &DeathEvent, host: &mut dyn RewardHost) -> DeathOutcome {
        let victim_reset = event
            .victim
            .actor_id()
            .is_some_and(|victim| engine::record_death(&mut self.store, &self.config, victim));

        let eligibility = eligibility::evaluate(event, &self.config, &*host);
        let Eligibility::Qualifies { killer } = eligibility else {
            debug!(
                victim = ?event.victim,
                killer = ?event.killer,
                reason = eligibility.as_str(),
                "Kill not counted"
            );
            return DeathOutcome {
                victim_reset,
                eligibility,
                tally: None,
            };
        };

        let tally = engine::record_kill(&mut self.store, &self.config, killer);
        if let Some(reward) = engine::resolve(&self.config, tally.kill_count) {
            info!(
                actor = %killer,
                milestone = tally.kill_count,
                "Milestone reached"
            );
            dispatch::dispatch(host, killer, reward);
        }

        DeathOutcome {
            victim_reset,
            eligibility,
            tally: Some(tally),
        }
    }

    /// Discard every counter and delete the counter document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the document cannot be removed.
    /// The in-memory counters are cleared regardless.
    pub fn on_world_reset(&mut self) -> Result<(), ServiceError> {
        self.store.wipe()?;
        Ok(())
    }

    /// Re-read, migrate, and apply the configuration document.
    ///
    /// Counters are kept. A counter above a lowered top milestone wraps on
    /// the actor's next qualifying kill.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if loading fails; the previous
    /// configuration stays in effect.
    pub fn reload_config(&mut self) -> Result<MigrationOutcome, ServiceError> {
        let loaded = config::load(self.config_documents.as_ref())?;
        self.config = loaded.config;
        info!("Configuration reloaded");
        Ok(loaded.migration)
    }
}
