//! Reference resolution.
//!
//! Legacy records point at each other by username or by a
//! `room/creator/location` path. Structural references (room creator, room
//! players) go through `resolve_strict` and abort the run when missing;
//! annotative ones (shape owners, location options) go through
//! `resolve_lenient` and are dropped when missing.
use std::fmt;

use save_migrate_repository::{DestinationRepository, RepositoryError};
use sqlx::SqliteConnection;

use crate::errors::MigrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    User,
    Location,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::User => write!(f, "user"),
            ReferenceKind::Location => write!(f, "location"),
        }
    }
}

/// A `room/creator/location` path as used by per-location user options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationKey<'a> {
    pub room: &'a str,
    pub creator: &'a str,
    pub location: &'a str,
}

impl<'a> LocationKey<'a> {
    /// Splits a composite key; anything but exactly three segments is rejected.
    pub fn parse(key: &'a str) -> Option<Self> {
        let mut parts = key.split('/');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(room), Some(creator), Some(location), None) => Some(Self {
                room,
                creator,
                location,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for LocationKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.room, self.creator, self.location)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Reference<'a> {
    User(&'a str),
    Location(LocationKey<'a>),
}

impl Reference<'_> {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Reference::User(_) => ReferenceKind::User,
            Reference::Location(_) => ReferenceKind::Location,
        }
    }

    fn key(&self) -> String {
        match self {
            Reference::User(username) => username.to_string(),
            Reference::Location(key) => key.to_string(),
        }
    }
}

pub struct ReferenceResolver<'r, R> {
    repository: &'r R,
}

impl<'r, R: DestinationRepository> ReferenceResolver<'r, R> {
    pub fn new(repository: &'r R) -> Self {
        Self { repository }
    }

    /// Resolves a reference that must exist.
    ///
    /// `referrer` names who holds the reference (e.g. `Room Tavern player`)
    /// and ends up in the error message.
    pub async fn resolve_strict(
        &self,
        conn: &mut SqliteConnection,
        reference: Reference<'_>,
        referrer: impl fmt::Display,
    ) -> Result<i64, MigrationError> {
        self.lookup(conn, reference)
            .await?
            .ok_or_else(|| MigrationError::UnresolvedReference {
                referrer: referrer.to_string(),
                kind: reference.kind(),
                key: reference.key(),
            })
    }

    /// Resolves a reference that may be missing. Blank keys never resolve.
    pub async fn resolve_lenient(
        &self,
        conn: &mut SqliteConnection,
        reference: Reference<'_>,
    ) -> Result<Option<i64>, MigrationError> {
        Ok(self.lookup(conn, reference).await?)
    }

    async fn lookup(
        &self,
        conn: &mut SqliteConnection,
        reference: Reference<'_>,
    ) -> Result<Option<i64>, RepositoryError> {
        match reference {
            Reference::User(username) if username.trim().is_empty() => Ok(None),
            Reference::User(username) => self.repository.find_user_id(conn, username).await,
            Reference::Location(key) => {
                self.repository
                    .find_location_id(conn, key.room, key.creator, key.location)
                    .await
            }
        }
    }
}
