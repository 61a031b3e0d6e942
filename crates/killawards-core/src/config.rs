//! Configuration schema defaults, validation, and migration.
//!
//! The configuration lives in the `KillAwards` document of the config
//! [`DocumentStore`]. On load the stored document is decoded, migrated to
//! the running schema version, validated, and written straight back so
//! operators always see the current key layout.
//!
//! Migration is a hard-reset policy: a document older than
//! [`HARD_RESET_BELOW`] is replaced wholesale by [`default_config`]. Newer
//! documents at or above the baseline only get their version stamped.

use killawards_types::{CommandKind, CommandSpec, Configuration, RewardDefinition};
use semver::Version;
use tracing::{info, warn};

use crate::storage::{DocumentStore, StorageError};

/// Name of the system. Both persisted documents are stored under it.
pub const SYSTEM_NAME: &str = "KillAwards";

/// Schema version written by this build.
pub const SCHEMA_VERSION: Version = Version::new(1, 0, 0);

/// Documents older than this are replaced with the compiled-in default.
pub const HARD_RESET_BELOW: Version = Version::new(1, 0, 0);

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config document could not be read or written.
    #[error("config storage error: {source}")]
    Storage {
        /// The underlying storage error.
        #[from]
        source: StorageError,
    },

    /// The config document is not valid JSON for the schema.
    #[error("failed to parse config JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The config decoded but breaks a schema rule.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong with the document.
        reason: String,
    },
}

/// What [`migrate`] did to a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Already at the running version. Nothing changed.
    Current,
    /// Older than the running version but not below the baseline. Only
    /// the version was stamped.
    Stamped {
        /// The version found in the document.
        from: String,
    },
    /// Below the baseline (or unparseable). Replaced by the default.
    Reset {
        /// The version found in the document.
        from: String,
    },
    /// Written by a newer build. Left untouched.
    Newer {
        /// The version found in the document.
        found: String,
    },
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Decoded from the stored document.
    Stored,
    /// No document existed; the compiled-in default was used.
    Default,
}

/// Result of [`load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// The configuration now in effect.
    pub config: Configuration,
    /// Whether it came from storage or the default.
    pub source: ConfigSource,
    /// What migration did to it.
    pub migration: MigrationOutcome,
}

/// The shipped configuration: three milestones with escalating rewards.
pub fn default_config() -> Configuration {
    let milestones = [
        (
            1,
            RewardDefinition {
                health_restored: 10.0,
                refill_ammo: false,
                gear_set_name: None,
                commands: Vec::new(),
            },
        ),
        (
            2,
            RewardDefinition {
                health_restored: 15.0,
                refill_ammo: true,
                gear_set_name: None,
                commands: Vec::new(),
            },
        ),
        (
            3,
            RewardDefinition {
                health_restored: 20.0,
                refill_ammo: true,
                gear_set_name: None,
                commands: vec![CommandSpec::new(
                    CommandKind::ServerConsole,
                    "inventory.giveto {PlayerId} scrap 50",
                )],
            },
        ),
    ]
    .into_iter()
    .collect();

    Configuration {
        schema_version: SCHEMA_VERSION.to_string(),
        include_non_actor_kills: false,
        include_wildlife_kills: false,
        ignore_teammate_kills: true,
        reset_counter_on_death: true,
        milestones,
    }
}

/// Bring a configuration up to `running`.
///
/// Pure: the caller decides whether to persist the result.
pub fn migrate(config: Configuration, running: &Version) -> (Configuration, MigrationOutcome) {
    let stored = Version::parse(config.schema_version.trim()).ok();

    match &stored {
        Some(version) if version == running => (config, MigrationOutcome::Current),
        Some(version) if version > running => {
            let found = config.schema_version.clone();
            (config, MigrationOutcome::Newer { found })
        }
        _ => {
            let from = config.schema_version.clone();
            let below_baseline = stored
                .as_ref()
                .is_none_or(|version| *version < HARD_RESET_BELOW);

            let mut migrated = if below_baseline {
                default_config()
            } else {
                config
            };
            migrated.schema_version = running.to_string();

            let outcome = if below_baseline {
                MigrationOutcome::Reset { from }
            } else {
                MigrationOutcome::Stamped { from }
            };
            (migrated, outcome)
        }
    }
}

/// Check the schema rules that serde cannot express.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if a milestone is keyed at zero or a
/// reward's health amount is negative or not finite.
pub fn validate(config: &Configuration) -> Result<(), ConfigError> {
    if config.milestones.contains_key(&0) {
        return Err(ConfigError::Invalid {
            reason: "milestone 0 can never be reached; milestone keys start at 1".to_owned(),
        });
    }

    for (milestone, reward) in &config.milestones {
        if !reward.health_restored.is_finite() || reward.health_restored < 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "milestone {milestone}: healthRestored must be a non-negative number, got {}",
                    reward.health_restored
                ),
            });
        }
    }

    Ok(())
}

/// Decode a configuration document without migrating or validating it.
///
/// # Errors
///
/// Returns [`ConfigError::Json`] if the text does not match the schema.
pub fn parse(json: &str) -> Result<Configuration, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Load, migrate, validate, and write back the configuration.
///
/// A missing document is not an error: the default is used and persisted.
///
/// # Errors
///
/// Returns [`ConfigError`] if the document cannot be read, decoded, or
/// validated, or if writing it back fails.
pub fn load(documents: &dyn DocumentStore) -> Result<LoadedConfig, ConfigError> {
    let (stored, source) = match documents.read(SYSTEM_NAME)? {
        Some(text) => (parse(&text)?, ConfigSource::Stored),
        None => {
            info!("No stored configuration found, using defaults");
            (default_config(), ConfigSource::Default)
        }
    };

    let (config, migration) = migrate(stored, &SCHEMA_VERSION);
    match &migration {
        MigrationOutcome::Current => {}
        MigrationOutcome::Stamped { from } | MigrationOutcome::Reset { from } => {
            warn!(
                from = from.as_str(),
                to = %SCHEMA_VERSION,
                reset = matches!(migration, MigrationOutcome::Reset { .. }),
                "Config changes detected, updated to running schema version"
            );
        }
        MigrationOutcome::Newer { found } => {
            warn!(
                found = found.as_str(),
                running = %SCHEMA_VERSION,
                "Config was written by a newer version, loading as-is"
            );
        }
    }

    validate(&config)?;
    if config.milestones.is_empty() {
        warn!("No milestones configured; kills will be counted but never rewarded");
    }

    save(documents, &config)?;

    info!(
        milestones = config.milestones.len(),
        wrap_at = ?config.max_milestone(),
        "Configuration loaded"
    );

    Ok(LoadedConfig {
        config,
        source,
        migration,
    })
}

/// Write the configuration document.
///
/// # Errors
///
/// Returns [`ConfigError`] if encoding or writing fails.
pub fn save(documents: &dyn DocumentStore, config: &Configuration) -> Result<(), ConfigError> {
    let text = serde_json::to_string_pretty(config)?;
    documents.write(SYSTEM_NAME, &text)?;
    Ok(())
}
