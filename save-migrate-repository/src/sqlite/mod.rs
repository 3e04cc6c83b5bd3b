//! SQLite implementation of the destination store.
mod connection;
mod destination_repository;

pub use connection::{connect, create_schema, MIGRATOR};
pub use destination_repository::SqliteDestinationRepository;
