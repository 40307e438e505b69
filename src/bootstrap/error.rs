//! Errors raised while wiring storage or seeding.

use crate::task_type::services::TaskTypeRegistryServiceError;
use crate::user::{domain::UserDomainError, ports::UserDirectoryError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures during startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The seed file path has no file name component.
    #[error("seed path '{0}' does not name a file")]
    InvalidSeedPath(Utf8PathBuf),

    /// The seed file could not be read.
    #[error("failed to read seed file '{path}': {source}")]
    ReadSeed {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The seed document is not valid YAML for a seed plan.
    #[error("malformed seed document: {0}")]
    ParseSeed(#[from] serde_yaml::Error),

    /// A seeded user is invalid.
    #[error(transparent)]
    InvalidUser(#[from] UserDomainError),

    /// User storage failed.
    #[error(transparent)]
    Users(#[from] UserDirectoryError),

    /// Task type registration failed.
    #[error(transparent)]
    TaskTypes(#[from] TaskTypeRegistryServiceError),

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Applying the schema failed.
    #[error("failed to apply schema: {0}")]
    Schema(#[from] diesel::result::Error),

    /// The schema task panicked or was cancelled.
    #[error("schema task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}
