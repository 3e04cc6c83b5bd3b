//! Error types for the save migration.
//!
//! Every variant is fatal: the run stops, the open phase is rolled back and the
//! process exits with status 2. Lenient references never produce an error.
use std::path::PathBuf;

use save_migrate_repository::RepositoryError;
use save_migrate_shared::NumberError;
use thiserror::Error;

use crate::migration::ReferenceKind;

#[derive(Debug, Error)]
pub enum LegacyStoreError {
    #[error("Failed to read legacy store {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse legacy store {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Destination store {} already exists. Abort conversion.", .0.display())]
    Preflight(PathBuf),

    #[error("{referrer} {key} does not appear in the {kind} map.")]
    UnresolvedReference {
        referrer: String,
        kind: ReferenceKind,
        key: String,
    },

    #[error("Shape {shape} has an invalid {field}: {source}")]
    InvalidNumber {
        shape: String,
        field: &'static str,
        #[source]
        source: NumberError,
    },

    #[error("Failed to write {entity}: {source}")]
    Write {
        entity: String,
        #[source]
        source: RepositoryError,
    },

    #[error("Legacy store error: {0}")]
    LegacyStore(#[from] LegacyStoreError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for MigrationError {
    fn from(error: sqlx::Error) -> Self {
        MigrationError::Repository(RepositoryError::from(error))
    }
}

/// Attaches the entity being written to a repository failure.
pub(crate) trait WriteContext<T> {
    fn entity<F>(self, describe: F) -> Result<T, MigrationError>
    where
        F: FnOnce() -> String;
}

impl<T> WriteContext<T> for Result<T, RepositoryError> {
    fn entity<F>(self, describe: F) -> Result<T, MigrationError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| MigrationError::Write {
            entity: describe(),
            source,
        })
    }
}
