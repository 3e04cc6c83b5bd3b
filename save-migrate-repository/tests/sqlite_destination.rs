//! Integration tests for the SQLite destination repository.
//!
//! Each test runs against a fresh in-memory database with the destination
//! schema applied.
//!
//! Run with: `cargo test --test sqlite_destination`

use save_migrate_repository::{
    create_schema, DestinationRepository, RepositoryError, SqliteDestinationRepository,
};
use save_migrate_shared::{
    FieldValue, NewAsset, NewLayer, NewLocation, NewLocationUserOption, NewRoom, NewShape,
    NewUser, NewUserOption,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    create_schema(&pool).await.unwrap();
    pool
}

fn make_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: format!("hash-{username}"),
    }
}

async fn make_location(pool: &SqlitePool, repository: &SqliteDestinationRepository) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    let creator_id = repository
        .insert_user(&mut conn, &make_user("dm"))
        .await
        .unwrap();
    let room_id = repository
        .insert_room(
            &mut conn,
            &NewRoom {
                name: "Tavern".to_string(),
                creator_id,
                invitation_code: "code-1".to_string(),
                player_location: None,
                dm_location: Some("Cellar".to_string()),
            },
        )
        .await
        .unwrap();
    repository
        .insert_location(
            &mut conn,
            &NewLocation {
                room_id,
                name: "Cellar".to_string(),
            },
        )
        .await
        .unwrap()
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_insert_and_find_user() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let mut conn = pool.acquire().await.unwrap();

    let id = repository
        .insert_user(&mut conn, &make_user("alice"))
        .await
        .unwrap();

    assert_eq!(
        repository.find_user_id(&mut conn, "alice").await.unwrap(),
        Some(id)
    );
    assert_eq!(
        repository.find_user_id(&mut conn, "bob").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let mut conn = pool.acquire().await.unwrap();

    repository
        .insert_user(&mut conn, &make_user("alice"))
        .await
        .unwrap();
    let result = repository.insert_user(&mut conn, &make_user("alice")).await;

    match result {
        Err(RepositoryError::UniqueViolation { table, .. }) => assert_eq!(table, "users"),
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_user_option_keeps_defaults_for_absent_columns() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let mut conn = pool.acquire().await.unwrap();

    let user_id = repository
        .insert_user(&mut conn, &make_user("alice"))
        .await
        .unwrap();
    repository
        .insert_user_option(
            &mut conn,
            &NewUserOption {
                user_id,
                columns: vec![("grid_colour", FieldValue::Text("#abcdef".to_string()))],
            },
        )
        .await
        .unwrap();

    let (fow, grid, ruler): (String, String, String) = sqlx::query_as(
        "SELECT fow_colour, grid_colour, ruler_colour FROM user_options WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await
    .unwrap();

    assert_eq!(fow, "#007c00");
    assert_eq!(grid, "#abcdef");
    assert_eq!(ruler, "#F00");
}

// ============================================================================
// Integrity
// ============================================================================

#[tokio::test]
async fn test_asset_with_missing_owner_is_foreign_key_violation() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let mut conn = pool.acquire().await.unwrap();

    let result = repository
        .insert_asset(
            &mut conn,
            &NewAsset {
                owner_id: 999,
                parent_id: None,
                name: "maps".to_string(),
                file_hash: None,
            },
        )
        .await;

    let error = result.unwrap_err();
    assert!(error.is_integrity_violation());
    assert!(matches!(
        error,
        RepositoryError::ForeignKeyViolation { table: "assets", .. }
    ));
}

#[tokio::test]
async fn test_duplicate_layer_index_is_rejected() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let location_id = make_location(&pool, &repository).await;
    let mut conn = pool.acquire().await.unwrap();

    let layer = NewLayer {
        location_id,
        name: "tokens".to_string(),
        player_visible: true,
        player_editable: true,
        selectable: true,
        visible: true,
        index: 0,
    };
    repository.insert_layer(&mut conn, &layer).await.unwrap();
    let result = repository.insert_layer(&mut conn, &layer).await;

    assert!(matches!(
        result,
        Err(RepositoryError::UniqueViolation { table: "layers", .. })
    ));
}

// ============================================================================
// Lookups and optional columns
// ============================================================================

#[tokio::test]
async fn test_find_location_requires_exact_triple() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let location_id = make_location(&pool, &repository).await;
    let mut conn = pool.acquire().await.unwrap();

    assert_eq!(
        repository
            .find_location_id(&mut conn, "Tavern", "dm", "Cellar")
            .await
            .unwrap(),
        Some(location_id)
    );
    assert_eq!(
        repository
            .find_location_id(&mut conn, "Tavern", "someone-else", "Cellar")
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        repository
            .find_location_id(&mut conn, "tavern", "dm", "Cellar")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_shape_optional_columns() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let location_id = make_location(&pool, &repository).await;
    let mut conn = pool.acquire().await.unwrap();

    let layer_id = repository
        .insert_layer(
            &mut conn,
            &NewLayer {
                location_id,
                name: "tokens".to_string(),
                player_visible: true,
                player_editable: true,
                selectable: true,
                visible: true,
                index: 0,
            },
        )
        .await
        .unwrap();
    repository
        .insert_shape(
            &mut conn,
            &NewShape {
                uuid: "shape-1".to_string(),
                layer_id,
                x: 10.0,
                y: 20.5,
                index: 0,
                columns: vec![
                    ("fill_colour", FieldValue::Text("#ff0000".to_string())),
                    ("is_token", FieldValue::Bool(true)),
                ],
            },
        )
        .await
        .unwrap();

    let (fill, border, is_token, draw_operator): (String, String, bool, String) = sqlx::query_as(
        "SELECT fill_colour, border_colour, is_token, draw_operator FROM shapes WHERE uuid = ?",
    )
    .bind("shape-1")
    .fetch_one(&mut *conn)
    .await
    .unwrap();

    assert_eq!(fill, "#ff0000");
    assert_eq!(border, "#fff");
    assert!(is_token);
    assert_eq!(draw_operator, "source-over");
}

#[tokio::test]
async fn test_location_user_option_columns() {
    let pool = setup_pool().await;
    let repository = SqliteDestinationRepository::new();
    let location_id = make_location(&pool, &repository).await;
    let mut conn = pool.acquire().await.unwrap();
    let user_id = repository
        .find_user_id(&mut conn, "dm")
        .await
        .unwrap()
        .unwrap();

    repository
        .insert_location_user_option(
            &mut conn,
            &NewLocationUserOption {
                location_id,
                user_id,
                columns: vec![("pan_x", FieldValue::Integer(-40))],
            },
        )
        .await
        .unwrap();

    let (pan_x, pan_y, zoom): (i64, i64, f64) = sqlx::query_as(
        "SELECT pan_x, pan_y, zoom_factor FROM location_user_options WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await
    .unwrap();

    assert_eq!((pan_x, pan_y), (-40, 0));
    assert_eq!(zoom, 1.0);
}
