//! Enumeration types shared between the engine and its host.

use serde::{Deserialize, Serialize};

use crate::ids::ActorId;

// ---------------------------------------------------------------------------
// Command sinks
// ---------------------------------------------------------------------------

/// Where a reward command is sent once its placeholders are filled in.
///
/// The legacy names (`Chat`, `Server`, `Client`) are accepted when decoding
/// so that reward tables written by older releases keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Said in chat as the rewarded actor.
    #[serde(alias = "Chat")]
    ChatMessage,
    /// Executed on the server console.
    #[serde(alias = "Server")]
    ServerConsole,
    /// Executed on the rewarded actor's client console.
    #[serde(alias = "Client")]
    ClientConsole,
}

impl CommandKind {
    /// Human-readable label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChatMessage => "chat",
            Self::ServerConsole => "server",
            Self::ClientConsole => "client",
        }
    }
}

impl core::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Victims
// ---------------------------------------------------------------------------

/// Classification of the entity that died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Victim {
    /// A player-shaped actor. `npc` is set for actors not controlled by a
    /// real player.
    Actor {
        /// The victim's identity.
        id: ActorId,
        /// Whether the victim is a non-player-controlled actor.
        #[serde(default)]
        npc: bool,
    },
    /// An animal.
    Wildlife,
    /// Anything else (structures, vehicles, props).
    Other,
}

impl Victim {
    /// The victim's actor id, if it is an actor.
    pub const fn actor_id(&self) -> Option<ActorId> {
        match self {
            Self::Actor { id, .. } => Some(*id),
            Self::Wildlife | Self::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_command_kind_names_decode() {
        let kinds: Result<Vec<CommandKind>, _> =
            serde_json::from_str(r#"["Chat", "Server", "Client", "ServerConsole"]"#);
        assert_eq!(
            kinds.ok(),
            Some(vec![
                CommandKind::ChatMessage,
                CommandKind::ServerConsole,
                CommandKind::ClientConsole,
                CommandKind::ServerConsole,
            ])
        );
    }

    #[test]
    fn victim_decodes_tagged() {
        let victim: Result<Victim, _> =
            serde_json::from_str(r#"{"kind": "actor", "id": 76561198000000001}"#);
        assert_eq!(
            victim.ok(),
            Some(Victim::Actor {
                id: ActorId(76_561_198_000_000_001),
                npc: false,
            })
        );

        let wildlife: Result<Victim, _> = serde_json::from_str(r#"{"kind": "wildlife"}"#);
        assert_eq!(wildlife.ok(), Some(Victim::Wildlife));
    }
}
