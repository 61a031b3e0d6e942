//! Which deaths count as qualifying kills.
//!
//! Rules are evaluated in a fixed order and the first rejection wins:
//!
//! 1. The killer must exist, differ from the victim, and be trackable.
//! 2. Actor victims: teammates are rejected when `ignoreTeammateKills` is
//!    set, then NPC victims are rejected unless `includeNonActorKills` is set.
//! 3. Wildlife victims are rejected unless `includeWildlifeKills` is set.
//! 4. Every other victim kind is rejected.
//!
//! The victim-side death reset is not part of this filter; it runs before
//! it, whether or not the kill qualifies.

use killawards_types::{ActorId, Configuration, DeathEvent, Victim};

/// Answers "are these two actors on the same team?".
pub trait TeamDirectory {
    /// Whether `first` and `second` share a team.
    fn are_teammates(&self, first: ActorId, second: ActorId) -> bool;
}

/// Verdict of the eligibility filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eligibility {
    /// The kill counts for `killer`.
    Qualifies {
        /// The actor credited with the kill.
        killer: ActorId,
    },
    /// Nobody is credited with the kill.
    RejectedNoKiller,
    /// The victim killed itself.
    RejectedSelfKill,
    /// The killer is not a real account.
    RejectedUntrackableKiller,
    /// The victim is the killer's teammate and teammate kills are ignored.
    RejectedTeammate,
    /// The victim is an NPC and NPC kills are excluded.
    RejectedNpcExcluded,
    /// The victim is an animal and animal kills are excluded.
    RejectedWildlifeExcluded,
    /// The victim is not an actor or an animal.
    RejectedUnknownVictimKind,
}

impl Eligibility {
    /// Whether the kill should be counted.
    pub const fn qualifies(self) -> bool {
        matches!(self, Self::Qualifies { .. })
    }

    /// Human-readable label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qualifies { .. } => "qualifies",
            Self::RejectedNoKiller => "no_killer",
            Self::RejectedSelfKill => "self_kill",
            Self::RejectedUntrackableKiller => "untrackable_killer",
            Self::RejectedTeammate => "teammate",
            Self::RejectedNpcExcluded => "npc_excluded",
            Self::RejectedWildlifeExcluded => "wildlife_excluded",
            Self::RejectedUnknownVictimKind => "unknown_victim_kind",
        }
    }
}

/// Decide whether `event` counts as a qualifying kill.
pub fn evaluate<T>(event: &DeathEvent, config: &Configuration, teams: &T) -> Eligibility
where
    T: TeamDirectory + ?Sized,
{
    let Some(killer) = event.killer else {
        return Eligibility::RejectedNoKiller;
    };
    if event.victim.actor_id() == Some(killer) {
        return Eligibility::RejectedSelfKill;
    }
    if !killer.is_trackable() {
        return Eligibility::RejectedUntrackableKiller;
    }

    match event.victim {
        Victim::Actor { id, npc } => {
            if config.ignore_teammate_kills && teams.are_teammates(killer, id) {
                return Eligibility::RejectedTeammate;
            }
            if npc && !config.include_non_actor_kills {
                return Eligibility::RejectedNpcExcluded;
            }
        }
        Victim::Wildlife => {
            if !config.include_wildlife_kills {
                return Eligibility::RejectedWildlifeExcluded;
            }
        }
        Victim::Other => return Eligibility::RejectedUnknownVictimKind,
    }

    Eligibility::Qualifies { killer }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::default_config;

    const ALICE: ActorId = ActorId(76_561_198_000_000_001);
    const BOB: ActorId = ActorId(76_561_198_000_000_002);
    const SCIENTIST: ActorId = ActorId(4_200);

    struct Teams(BTreeSet<(ActorId, ActorId)>);

    impl TeamDirectory for Teams {
        fn are_teammates(&self, first: ActorId, second: ActorId) -> bool {
            self.0.contains(&(first, second)) || self.0.contains(&(second, first))
        }
    }

    fn no_teams() -> Teams {
        Teams(BTreeSet::new())
    }

    fn player(id: ActorId) -> Victim {
        Victim::Actor { id, npc: false }
    }

    #[test]
    fn player_kill_qualifies() {
        let event = DeathEvent::new(player(BOB), Some(ALICE));
        assert_eq!(
            evaluate(&event, &default_config(), &no_teams()),
            Eligibility::Qualifies { killer: ALICE }
        );
    }

    #[test]
    fn killer_checks_run_first() {
        let config = default_config();
        let teams = no_teams();

        let no_killer = DeathEvent::new(player(BOB), None);
        assert_eq!(evaluate(&no_killer, &config, &teams), Eligibility::RejectedNoKiller);

        let suicide = DeathEvent::new(player(ALICE), Some(ALICE));
        assert_eq!(evaluate(&suicide, &config, &teams), Eligibility::RejectedSelfKill);

        let npc_killer = DeathEvent::new(Victim::Other, Some(SCIENTIST));
        assert_eq!(
            evaluate(&npc_killer, &config, &teams),
            Eligibility::RejectedUntrackableKiller
        );
    }

    #[test]
    fn teammate_kills_follow_flag() {
        let mut config = default_config();
        let teams = Teams([(ALICE, BOB)].into_iter().collect());
        let event = DeathEvent::new(player(BOB), Some(ALICE));

        assert_eq!(evaluate(&event, &config, &teams), Eligibility::RejectedTeammate);

        config.ignore_teammate_kills = false;
        assert!(evaluate(&event, &config, &teams).qualifies());
    }

    #[test]
    fn npc_kills_follow_flag() {
        let mut config = default_config();
        let event = DeathEvent::new(
            Victim::Actor {
                id: SCIENTIST,
                npc: true,
            },
            Some(ALICE),
        );

        assert_eq!(
            evaluate(&event, &config, &no_teams()),
            Eligibility::RejectedNpcExcluded
        );

        config.include_non_actor_kills = true;
        assert!(evaluate(&event, &config, &no_teams()).qualifies());
    }

    #[test]
    fn wildlife_kills_follow_flag() {
        let mut config = default_config();
        let event = DeathEvent::new(Victim::Wildlife, Some(ALICE));

        assert_eq!(
            evaluate(&event, &config, &no_teams()),
            Eligibility::RejectedWildlifeExcluded
        );

        config.include_wildlife_kills = true;
        assert!(evaluate(&event, &config, &no_teams()).qualifies());
    }

    #[test]
    fn other_victims_never_qualify() {
        let mut config = default_config();
        config.include_non_actor_kills = true;
        config.include_wildlife_kills = true;
        let event = DeathEvent::new(Victim::Other, Some(ALICE));

        assert_eq!(
            evaluate(&event, &config, &no_teams()),
            Eligibility::RejectedUnknownVictimKind
        );
    }
}
