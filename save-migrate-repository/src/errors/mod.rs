//! Error types for the destination repository.
mod repository;

pub use repository::RepositoryError;
