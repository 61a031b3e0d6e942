//! Top-level error for the KillAwards service.
//!
//! [`ServiceError`] wraps every failure that can escape a
//! [`KillAwards`](crate::service::KillAwards) call, so a host can propagate
//! it with `?`. Failures inside a single reward action never reach this
//! type; the dispatcher logs them instead.

use crate::config::ConfigError;
use crate::store::StoreError;

/// Errors surfaced by the service to its host.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Loading or reloading configuration failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The counter store could not be wiped.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}
