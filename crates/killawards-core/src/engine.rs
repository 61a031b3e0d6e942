//! Counter advance, wrap policy, and reward resolution.
//!
//! Each actor's counter moves through `1..=max` one qualifying kill at a
//! time. The kill after the top milestone wraps the counter to `0`, not
//! `1`: that kill earns nothing, and the next one lands on milestone 1
//! again. With no milestones configured there is no boundary and the
//! counter only grows.

use killawards_types::{ActorId, Configuration, RewardDefinition};
use tracing::{debug, error};

use crate::store::CounterStore;

/// What happened to the killer's counter on one qualifying kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillTally {
    /// The actor whose counter moved.
    pub actor: ActorId,
    /// The counter after the kill.
    pub kill_count: u32,
    /// Whether this kill passed the top milestone and reset the counter.
    pub wrapped: bool,
    /// The milestone reached, if `kill_count` has a reward.
    pub milestone: Option<u32>,
    /// Whether the new counter reached storage.
    pub persisted: bool,
}

/// Next counter value after one kill, and whether it wrapped.
pub const fn advance(current: u32, max_milestone: Option<u32>) -> (u32, bool) {
    let next = current.saturating_add(1);
    match max_milestone {
        Some(max) if next > max => (0, true),
        _ => (next, false),
    }
}

/// The reward for a counter value. A counter of zero never has one.
pub fn resolve(config: &Configuration, kill_count: u32) -> Option<&RewardDefinition> {
    if kill_count == 0 {
        return None;
    }
    config.milestones.get(&kill_count)
}

/// Count a qualifying kill for `actor` and persist the new counter.
///
/// The record is created on first use. A failed save is logged and the
/// in-memory counter is kept.
pub fn record_kill(store: &mut CounterStore, config: &Configuration, actor: ActorId) -> KillTally {
    let record = store.record_mut(actor);
    let (kill_count, wrapped) = advance(record.kill_count, config.max_milestone());
    record.kill_count = kill_count;

    let persisted = persist(store, actor);
    let milestone = resolve(config, kill_count).map(|_| kill_count);

    debug!(
        actor = %actor,
        kill_count,
        wrapped,
        milestone = ?milestone,
        "Kill counted"
    );

    KillTally {
        actor,
        kill_count,
        wrapped,
        milestone,
        persisted,
    }
}

/// Reset `actor`'s counter on death when the configuration asks for it.
///
/// Only existing records are touched. Returns `true` if a counter was
/// reset.
pub fn record_death(store: &mut CounterStore, config: &Configuration, actor: ActorId) -> bool {
    if !config.reset_counter_on_death || !store.reset_if_present(actor) {
        return false;
    }

    persist(store, actor);
    debug!(actor = %actor, "Counter reset on death");
    true
}

fn persist(store: &CounterStore, actor: ActorId) -> bool {
    match store.save() {
        Ok(()) => true,
        Err(e) => {
            error!(actor = %actor, error = %e, "Failed to persist kill counters");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::storage::MemoryDocumentStore;

    const ALICE: ActorId = ActorId(76_561_198_000_000_001);

    fn empty_store() -> CounterStore {
        CounterStore::load_or_create(Box::new(MemoryDocumentStore::new()))
    }

    #[test]
    fn advance_wraps_to_zero_past_max() {
        assert_eq!(advance(0, Some(3)), (1, false));
        assert_eq!(advance(2, Some(3)), (3, false));
        assert_eq!(advance(3, Some(3)), (0, true));
    }

    #[test]
    fn advance_without_boundary_keeps_growing() {
        assert_eq!(advance(41, None), (42, false));
        assert_eq!(advance(u32::MAX, None), (u32::MAX, false));
    }

    #[test]
    fn counter_above_shrunk_boundary_wraps_next_kill() {
        assert_eq!(advance(7, Some(3)), (0, true));
    }

    #[test]
    fn zero_never_resolves() {
        let mut config = default_config();
        config.milestones.insert(0, killawards_types::RewardDefinition::default());
        assert!(resolve(&config, 0).is_none());
        assert!(resolve(&config, 1).is_some());
    }

    #[test]
    fn gaps_advance_without_reward() {
        let mut config = default_config();
        config.milestones.remove(&2);
        let mut store = empty_store();

        let first = record_kill(&mut store, &config, ALICE);
        assert_eq!(first.milestone, Some(1));

        let second = record_kill(&mut store, &config, ALICE);
        assert_eq!(second.kill_count, 2);
        assert_eq!(second.milestone, None);
        assert!(second.persisted);
        assert_eq!(store.kill_count(ALICE), Some(2));
    }

    #[test]
    fn death_reset_respects_flag_and_existing_record() {
        let mut config = default_config();
        let mut store = empty_store();

        assert!(!record_death(&mut store, &config, ALICE));
        assert_eq!(store.kill_count(ALICE), None);

        record_kill(&mut store, &config, ALICE);
        config.reset_counter_on_death = false;
        assert!(!record_death(&mut store, &config, ALICE));
        assert_eq!(store.kill_count(ALICE), Some(1));

        config.reset_counter_on_death = true;
        assert!(record_death(&mut store, &config, ALICE));
        assert_eq!(store.kill_count(ALICE), Some(0));
    }
}
