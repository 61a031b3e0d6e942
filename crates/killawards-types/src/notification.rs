//! Player-facing notifications emitted by the reward dispatcher.
//!
//! The host decides how a notification reaches the player (chat line,
//! toast, localized text). [`Notification::default_text`] renders the
//! shipped English messages for hosts without their own catalog.

use serde::{Deserialize, Serialize};

/// A message sent to an actor after a reward action succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// The actor was healed by `amount` health points.
    HealthRestored {
        /// Health points restored.
        amount: f32,
    },
    /// The actor's held weapon was refilled.
    AmmoRefilled,
    /// The actor received a named gear set.
    GearSetGiven {
        /// Name of the gear set.
        name: String,
    },
}

impl Notification {
    /// Stable message key, used by hosts to look up localized text.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::HealthRestored { .. } => "HealthRestored",
            Self::AmmoRefilled => "AmmoRefilled",
            Self::GearSetGiven { .. } => "GearSetGiven",
        }
    }

    /// Render the default English message.
    pub fn default_text(&self) -> String {
        match self {
            Self::HealthRestored { amount } => {
                format!("You have been healed by <color=#75A838>{amount}</color> health points!")
            }
            Self::AmmoRefilled => "Your ammo has been fully topped up!".to_owned(),
            Self::GearSetGiven { name } => {
                format!("You have received the gear set <color=#CACF52>{name}</color>!")
            }
        }
    }
}
