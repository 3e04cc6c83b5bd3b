//! # Save Migrate
//! One-shot conversion of a legacy campaign save into the normalized
//! relational store. The legacy save is read through [`legacy::LegacyStore`],
//! converted by [`migration::MigrationExecutor`] and written through the
//! destination repository.
pub mod config;
pub mod errors;
pub mod legacy;
pub mod migration;

pub use config::MigrationConfig;
pub use errors::{LegacyStoreError, MigrationError};
pub use legacy::LegacyStore;
pub use migration::{convert, MigrationExecutor, MigrationReport};
