use async_trait::async_trait;
use save_migrate_shared::{
    FieldValue, NewAsset, NewAura, NewLayer, NewLocation, NewLocationUserOption, NewRoom,
    NewShape, NewTracker, NewUser, NewUserOption,
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{DestinationRepository, RepositoryError};

/// Writes destination rows with plain parameterized statements.
///
/// The repository holds no state of its own; every call runs on the
/// connection it is handed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDestinationRepository;

impl SqliteDestinationRepository {
    pub fn new() -> Self {
        Self
    }

    /// Inserts a row whose column list depends on which optional fields the
    /// source carried. Columns that are left out keep their schema default.
    async fn insert_columns(
        conn: &mut SqliteConnection,
        table: &'static str,
        columns: &[(&'static str, FieldValue)],
    ) -> Result<(), RepositoryError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!("INSERT INTO {table} ("));

        let mut names = builder.separated(", ");
        for (column, _) in columns {
            names.push(format!("\"{column}\""));
        }
        builder.push(") VALUES (");

        let mut values = builder.separated(", ");
        for (_, value) in columns {
            match value {
                FieldValue::Text(text) => values.push_bind(text.clone()),
                FieldValue::Bool(flag) => values.push_bind(*flag),
                FieldValue::Integer(number) => values.push_bind(*number),
                FieldValue::Real(number) => values.push_bind(*number),
            };
        }
        builder.push(")");

        builder
            .build()
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::on_table(table))?;

        Ok(())
    }
}

#[async_trait]
impl DestinationRepository for SqliteDestinationRepository {
    async fn insert_user(
        &self,
        conn: &mut SqliteConnection,
        user: &NewUser,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar(
            "INSERT INTO users (username, password_hash) VALUES (?, ?) RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::on_table("users"))
    }

    async fn insert_user_option(
        &self,
        conn: &mut SqliteConnection,
        option: &NewUserOption,
    ) -> Result<(), RepositoryError> {
        let mut columns = vec![("user_id", FieldValue::Integer(option.user_id))];
        columns.extend(option.columns.iter().cloned());
        Self::insert_columns(conn, "user_options", &columns).await
    }

    async fn insert_asset(
        &self,
        conn: &mut SqliteConnection,
        asset: &NewAsset,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar(
            "INSERT INTO assets (owner_id, parent_id, name, file_hash) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(asset.owner_id)
        .bind(asset.parent_id)
        .bind(&asset.name)
        .bind(&asset.file_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::on_table("assets"))
    }

    async fn insert_room(
        &self,
        conn: &mut SqliteConnection,
        room: &NewRoom,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar(
            r#"INSERT INTO rooms (name, creator_id, invitation_code, player_location, dm_location)
               VALUES (?, ?, ?, ?, ?) RETURNING id"#,
        )
        .bind(&room.name)
        .bind(room.creator_id)
        .bind(&room.invitation_code)
        .bind(&room.player_location)
        .bind(&room.dm_location)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::on_table("rooms"))
    }

    async fn insert_player_room(
        &self,
        conn: &mut SqliteConnection,
        room_id: i64,
        player_id: i64,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO player_rooms (player_id, room_id) VALUES (?, ?)")
            .bind(player_id)
            .bind(room_id)
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::on_table("player_rooms"))?;
        Ok(())
    }

    async fn insert_location(
        &self,
        conn: &mut SqliteConnection,
        location: &NewLocation,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("INSERT INTO locations (room_id, name) VALUES (?, ?) RETURNING id")
            .bind(location.room_id)
            .bind(&location.name)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::on_table("locations"))
    }

    async fn insert_layer(
        &self,
        conn: &mut SqliteConnection,
        layer: &NewLayer,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar(
            r#"INSERT INTO layers
                (location_id, name, player_visible, player_editable, selectable, visible, "index")
               VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id"#,
        )
        .bind(layer.location_id)
        .bind(&layer.name)
        .bind(layer.player_visible)
        .bind(layer.player_editable)
        .bind(layer.selectable)
        .bind(layer.visible)
        .bind(layer.index)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::on_table("layers"))
    }

    async fn insert_shape(
        &self,
        conn: &mut SqliteConnection,
        shape: &NewShape,
    ) -> Result<(), RepositoryError> {
        let mut columns = vec![
            ("uuid", FieldValue::Text(shape.uuid.clone())),
            ("layer_id", FieldValue::Integer(shape.layer_id)),
            ("x", FieldValue::Real(shape.x)),
            ("y", FieldValue::Real(shape.y)),
            ("index", FieldValue::Integer(shape.index)),
        ];
        columns.extend(shape.columns.iter().cloned());
        Self::insert_columns(conn, "shapes", &columns).await
    }

    async fn insert_tracker(
        &self,
        conn: &mut SqliteConnection,
        tracker: &NewTracker,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO trackers (uuid, shape_uuid, visible, name, value, maxvalue)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&tracker.uuid)
        .bind(&tracker.shape_uuid)
        .bind(tracker.visible)
        .bind(&tracker.name)
        .bind(tracker.value)
        .bind(tracker.maxvalue)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::on_table("trackers"))?;
        Ok(())
    }

    async fn insert_aura(
        &self,
        conn: &mut SqliteConnection,
        aura: &NewAura,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO auras (uuid, shape_uuid, light_source, visible, name, value, dim, colour)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&aura.uuid)
        .bind(&aura.shape_uuid)
        .bind(aura.light_source)
        .bind(aura.visible)
        .bind(&aura.name)
        .bind(aura.value)
        .bind(aura.dim)
        .bind(&aura.colour)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::on_table("auras"))?;
        Ok(())
    }

    async fn insert_shape_owner(
        &self,
        conn: &mut SqliteConnection,
        shape_uuid: &str,
        user_id: i64,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO shape_owners (shape_uuid, user_id) VALUES (?, ?)")
            .bind(shape_uuid)
            .bind(user_id)
            .execute(&mut *conn)
            .await
            .map_err(RepositoryError::on_table("shape_owners"))?;
        Ok(())
    }

    async fn insert_location_user_option(
        &self,
        conn: &mut SqliteConnection,
        option: &NewLocationUserOption,
    ) -> Result<(), RepositoryError> {
        let mut columns = vec![
            ("location_id", FieldValue::Integer(option.location_id)),
            ("user_id", FieldValue::Integer(option.user_id)),
        ];
        columns.extend(option.columns.iter().cloned());
        Self::insert_columns(conn, "location_user_options", &columns).await
    }

    async fn find_user_id(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<i64>, RepositoryError> {
        let id = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(id)
    }

    async fn find_location_id(
        &self,
        conn: &mut SqliteConnection,
        room: &str,
        creator: &str,
        location: &str,
    ) -> Result<Option<i64>, RepositoryError> {
        let id = sqlx::query_scalar(
            r#"SELECT locations.id
               FROM locations
               JOIN rooms ON rooms.id = locations.room_id
               JOIN users ON users.id = rooms.creator_id
               WHERE rooms.name = ? AND users.username = ? AND locations.name = ?
               LIMIT 1"#,
        )
        .bind(room)
        .bind(creator)
        .bind(location)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(id)
    }
}
