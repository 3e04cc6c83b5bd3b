//! # Save Migrate Repository
//! This crate provides the destination side of the save migration: the
//! `DestinationRepository` trait that writes normalized rows and answers the
//! lookups used for reference resolution, and its SQLite implementation
//! together with the schema migrations that create the destination tables.
pub mod errors;
pub mod interfaces;
pub mod sqlite;

pub use errors::RepositoryError;
pub use interfaces::DestinationRepository;
pub use sqlite::{connect, create_schema, SqliteDestinationRepository, MIGRATOR};
