//! This module defines the `DestinationRepository` trait, the write and lookup
//! surface the migration uses against the destination store.
//!
//! Every method runs on a caller supplied connection so the migration decides
//! the commit boundary: a transaction for atomic phases, a plain pooled
//! connection otherwise.
use async_trait::async_trait;
use save_migrate_shared::{
    NewAsset, NewAura, NewLayer, NewLocation, NewLocationUserOption, NewRoom, NewShape,
    NewTracker, NewUser, NewUserOption,
};
use sqlx::SqliteConnection;

use crate::errors::RepositoryError;

#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// Inserts a user and returns its destination id.
    ///
    /// # Errors
    ///
    /// `RepositoryError::UniqueViolation` if the username is already taken.
    async fn insert_user(
        &self,
        conn: &mut SqliteConnection,
        user: &NewUser,
    ) -> Result<i64, RepositoryError>;

    async fn insert_user_option(
        &self,
        conn: &mut SqliteConnection,
        option: &NewUserOption,
    ) -> Result<(), RepositoryError>;

    /// Inserts one folder or file of an asset tree and returns its id, which
    /// becomes the `parent_id` of its children.
    async fn insert_asset(
        &self,
        conn: &mut SqliteConnection,
        asset: &NewAsset,
    ) -> Result<i64, RepositoryError>;

    async fn insert_room(
        &self,
        conn: &mut SqliteConnection,
        room: &NewRoom,
    ) -> Result<i64, RepositoryError>;

    async fn insert_player_room(
        &self,
        conn: &mut SqliteConnection,
        room_id: i64,
        player_id: i64,
    ) -> Result<(), RepositoryError>;

    async fn insert_location(
        &self,
        conn: &mut SqliteConnection,
        location: &NewLocation,
    ) -> Result<i64, RepositoryError>;

    async fn insert_layer(
        &self,
        conn: &mut SqliteConnection,
        layer: &NewLayer,
    ) -> Result<i64, RepositoryError>;

    async fn insert_shape(
        &self,
        conn: &mut SqliteConnection,
        shape: &NewShape,
    ) -> Result<(), RepositoryError>;

    async fn insert_tracker(
        &self,
        conn: &mut SqliteConnection,
        tracker: &NewTracker,
    ) -> Result<(), RepositoryError>;

    async fn insert_aura(
        &self,
        conn: &mut SqliteConnection,
        aura: &NewAura,
    ) -> Result<(), RepositoryError>;

    async fn insert_shape_owner(
        &self,
        conn: &mut SqliteConnection,
        shape_uuid: &str,
        user_id: i64,
    ) -> Result<(), RepositoryError>;

    async fn insert_location_user_option(
        &self,
        conn: &mut SqliteConnection,
        option: &NewLocationUserOption,
    ) -> Result<(), RepositoryError>;

    /// Looks up a user by its unique username.
    async fn find_user_id(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<i64>, RepositoryError>;

    /// Looks up a location by exact room name, room creator and location name.
    async fn find_location_id(
        &self,
        conn: &mut SqliteConnection,
        room: &str,
        creator: &str,
        location: &str,
    ) -> Result<Option<i64>, RepositoryError>;
}
