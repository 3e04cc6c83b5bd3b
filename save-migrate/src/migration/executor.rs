// Migration executor - drives the conversion phase by phase
use std::time::Instant;

use save_migrate_repository::{create_schema, DestinationRepository};
use save_migrate_shared::{
    coerce_integer, LegacyLayer, LegacyLocation, LegacyRoom, LegacyShape, LegacyUser, NewAura,
    NewLayer, NewLocation, NewLocationUserOption, NewRoom, NewShape, NewTracker, NewUser,
    NewUserOption, LOCATION_OPTION_FIELDS, SHAPE_FIELDS, USER_OPTION_FIELDS,
};
use serde_json::Value;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::assets::write_asset_tree;
use super::report::MigrationReport;
use super::resolver::{LocationKey, Reference, ReferenceResolver};
use super::scope::{Phase, PhaseScope};
use crate::config::MigrationConfig;
use crate::errors::{MigrationError, WriteContext};
use crate::legacy::LegacyStore;

/// Migration executor that converts a legacy save into the destination store.
///
/// Phases run strictly in order: users, rooms, then per-location user options.
/// Users and rooms each commit as one unit.
pub struct MigrationExecutor<R> {
    pool: SqlitePool,
    repository: R,
    config: MigrationConfig,
}

impl<R: DestinationRepository> MigrationExecutor<R> {
    pub fn new(pool: SqlitePool, repository: R, config: MigrationConfig) -> Self {
        Self {
            pool,
            repository,
            config,
        }
    }

    /// Creates the destination tables and runs every phase.
    pub async fn execute(&self, store: &LegacyStore) -> Result<MigrationReport, MigrationError> {
        let start_time = Instant::now();
        let mut report = MigrationReport::default();

        create_schema(&self.pool).await?;

        info!("Creating users");
        let mut scope = PhaseScope::open(&self.pool, Phase::Users, true).await?;
        for user in store.users() {
            self.migrate_user(scope.conn(), user, &mut report).await?;
        }
        scope.finish().await?;

        info!("Creating rooms");
        let mut scope = PhaseScope::open(&self.pool, Phase::Rooms, true).await?;
        for room in store.rooms() {
            self.migrate_room(scope.conn(), room, &mut report).await?;
        }
        scope.finish().await?;

        info!("User-Location options");
        let mut scope = PhaseScope::open(
            &self.pool,
            Phase::LocationOptions,
            self.config.atomic_location_options,
        )
        .await?;
        for user in store.users() {
            self.migrate_location_options(scope.conn(), user, &mut report)
                .await?;
        }
        scope.finish().await?;

        report.log(start_time.elapsed());
        Ok(report)
    }

    fn resolver(&self) -> ReferenceResolver<'_, R> {
        ReferenceResolver::new(&self.repository)
    }

    async fn migrate_user(
        &self,
        conn: &mut SqliteConnection,
        user: &LegacyUser,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        info!(user = %user.username, "User");

        let user_id = self
            .repository
            .insert_user(
                conn,
                &NewUser {
                    username: user.username.clone(),
                    password_hash: user.password_hash.clone(),
                },
            )
            .await
            .entity(|| format!("user {}", user.username))?;
        report.users += 1;

        self.repository
            .insert_user_option(
                conn,
                &NewUserOption {
                    user_id,
                    columns: USER_OPTION_FIELDS.extract(&user.options),
                },
            )
            .await
            .entity(|| format!("options of user {}", user.username))?;
        report.user_options += 1;

        report.assets +=
            write_asset_tree(&self.repository, conn, &user.username, user_id, &user.asset_info)
                .await?;

        Ok(())
    }

    async fn migrate_room(
        &self,
        conn: &mut SqliteConnection,
        room: &LegacyRoom,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        info!(room = %room.name, "Room");
        let resolver = self.resolver();

        let creator_id = resolver
            .resolve_strict(
                conn,
                Reference::User(&room.creator),
                format!("Room {} creator", room.name),
            )
            .await?;

        let room_id = self
            .repository
            .insert_room(
                conn,
                &NewRoom {
                    name: room.name.clone(),
                    creator_id,
                    invitation_code: room.invitation_code.clone(),
                    player_location: room.player_location.clone(),
                    dm_location: room.dm_location.clone(),
                },
            )
            .await
            .entity(|| format!("room {}", room.name))?;
        report.rooms += 1;

        debug!(room = %room.name, players = room.players.len(), "PlayerRoom");
        for player in &room.players {
            let player_id = resolver
                .resolve_strict(
                    conn,
                    Reference::User(player),
                    format!("Room {} player", room.name),
                )
                .await?;
            self.repository
                .insert_player_room(conn, room_id, player_id)
                .await
                .entity(|| format!("player {} of room {}", player, room.name))?;
            report.player_rooms += 1;
        }

        for location in room.locations.values() {
            self.migrate_location(conn, room, room_id, location, report)
                .await?;
        }

        Ok(())
    }

    async fn migrate_location(
        &self,
        conn: &mut SqliteConnection,
        room: &LegacyRoom,
        room_id: i64,
        location: &LegacyLocation,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        info!(room = %room.name, location = %location.name, "Location");

        let location_id = self
            .repository
            .insert_location(
                conn,
                &NewLocation {
                    room_id,
                    name: location.name.clone(),
                },
            )
            .await
            .entity(|| format!("location {} of room {}", location.name, room.name))?;
        report.locations += 1;

        for (index, layer) in location.layers.iter().enumerate() {
            self.migrate_layer(conn, location, location_id, index, layer, report)
                .await?;
        }

        Ok(())
    }

    async fn migrate_layer(
        &self,
        conn: &mut SqliteConnection,
        location: &LegacyLocation,
        location_id: i64,
        index: usize,
        layer: &LegacyLayer,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        let layer_id = self
            .repository
            .insert_layer(
                conn,
                &NewLayer {
                    location_id,
                    name: layer.name.clone(),
                    player_visible: layer.player_visible,
                    player_editable: layer.player_editable,
                    selectable: layer.selectable,
                    visible: layer.visible,
                    index: index as i64,
                },
            )
            .await
            .entity(|| format!("layer {} of location {}", layer.name, location.name))?;
        report.layers += 1;

        for (index, shape) in layer.shapes.values().enumerate() {
            self.migrate_shape(conn, layer_id, index, shape, report)
                .await?;
        }

        Ok(())
    }

    async fn migrate_shape(
        &self,
        conn: &mut SqliteConnection,
        layer_id: i64,
        index: usize,
        shape: &LegacyShape,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        self.repository
            .insert_shape(
                conn,
                &NewShape {
                    uuid: shape.uuid.clone(),
                    layer_id,
                    x: shape.x,
                    y: shape.y,
                    index: index as i64,
                    columns: SHAPE_FIELDS.extract(&shape.attributes),
                },
            )
            .await
            .entity(|| format!("shape {}", shape.uuid))?;
        report.shapes += 1;

        for tracker in &shape.trackers {
            let row = NewTracker {
                uuid: tracker.uuid.clone(),
                shape_uuid: shape.uuid.clone(),
                visible: tracker.visible,
                name: tracker.name.clone(),
                value: coerce_field(shape, "tracker value", &tracker.value)?,
                maxvalue: coerce_field(shape, "tracker maxvalue", &tracker.maxvalue)?,
            };
            self.repository
                .insert_tracker(conn, &row)
                .await
                .entity(|| format!("tracker {} of shape {}", tracker.uuid, shape.uuid))?;
            report.trackers += 1;
        }

        for aura in &shape.auras {
            let row = NewAura {
                uuid: aura.uuid.clone(),
                shape_uuid: shape.uuid.clone(),
                light_source: aura.light_source,
                visible: aura.visible,
                name: aura.name.clone(),
                value: coerce_field(shape, "aura value", &aura.value)?,
                dim: coerce_field(shape, "aura dim", &aura.dim)?,
                colour: aura.colour.clone(),
            };
            self.repository
                .insert_aura(conn, &row)
                .await
                .entity(|| format!("aura {} of shape {}", aura.uuid, shape.uuid))?;
            report.auras += 1;
        }

        let resolver = self.resolver();
        for owner in &shape.owners {
            match resolver.resolve_lenient(conn, Reference::User(owner)).await? {
                Some(user_id) => {
                    self.repository
                        .insert_shape_owner(conn, &shape.uuid, user_id)
                        .await
                        .entity(|| format!("owner {} of shape {}", owner, shape.uuid))?;
                    report.shape_owners += 1;
                }
                None => {
                    debug!(shape = %shape.uuid, owner = %owner, "Skipping unknown shape owner");
                    report.skipped_shape_owners += 1;
                }
            }
        }

        Ok(())
    }

    async fn migrate_location_options(
        &self,
        conn: &mut SqliteConnection,
        user: &LegacyUser,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        let resolver = self.resolver();
        let user_id = resolver
            .resolve_strict(
                conn,
                Reference::User(&user.username),
                "Location options owner",
            )
            .await?;

        for (key, entry) in user.location_options() {
            let Some(location_key) = LocationKey::parse(key) else {
                debug!(user = %user.username, key, "Skipping malformed location option key");
                report.skipped_location_options += 1;
                continue;
            };

            let Some(location_id) = resolver
                .resolve_lenient(conn, Reference::Location(location_key))
                .await?
            else {
                debug!(user = %user.username, key, "Skipping location option for unknown location");
                report.skipped_location_options += 1;
                continue;
            };

            self.repository
                .insert_location_user_option(
                    conn,
                    &NewLocationUserOption {
                        location_id,
                        user_id,
                        columns: LOCATION_OPTION_FIELDS.extract(entry),
                    },
                )
                .await
                .entity(|| format!("location option {} of user {}", key, user.username))?;
            report.location_user_options += 1;
        }

        Ok(())
    }
}

fn coerce_field(shape: &LegacyShape, field: &'static str, value: &Value) -> Result<i64, MigrationError> {
    coerce_integer(value).map_err(|source| MigrationError::InvalidNumber {
        shape: shape.uuid.clone(),
        field,
        source,
    })
}
