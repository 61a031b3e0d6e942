//! Error types for the replay host binary.
//!
//! [`HostAppError`] is the top-level error that `main` propagates with `?`.

/// Top-level error for the replay host.
#[derive(Debug, thiserror::Error)]
pub enum HostAppError {
    /// The host settings file could not be read or parsed.
    #[error("settings error: {message}")]
    Settings {
        /// Description of the settings failure.
        message: String,
    },

    /// The scenario file could not be read or parsed.
    #[error("scenario error: {message}")]
    Scenario {
        /// Description of the scenario failure.
        message: String,
    },

    /// No scenario path was given on the command line.
    #[error("usage: killawards-host <scenario.json>")]
    Usage,

    /// The KillAwards service failed.
    #[error("service error: {source}")]
    Service {
        /// The underlying service error.
        #[from]
        source: killawards_core::ServiceError,
    },
}
