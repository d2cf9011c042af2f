//! Test utilities for Music Catalog
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data and user generators

use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use crate::{
    auth::Permission,
    config::Config,
    db::{
        entities::{album, artist, song, user},
        repositories::UserRepository,
    },
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
        static_dir: "static".to_string(),
        admin_username: None,
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await, test_config())
}

// ============================================================================
// Test Data Factories
// ============================================================================

pub async fn create_test_artist(db: &DatabaseConnection, description: &str) -> artist::Model {
    artist::ActiveModel {
        id: Set(Uuid::new_v4()),
        description: Set(description.to_string()),
        notes: Set(String::new()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test artist")
}

pub async fn create_test_album(
    db: &DatabaseConnection,
    artist_id: Uuid,
    description: &str,
    year: Option<i32>,
) -> album::Model {
    album::ActiveModel {
        id: Set(Uuid::new_v4()),
        description: Set(description.to_string()),
        artist_id: Set(artist_id),
        year: Set(year),
    }
    .insert(db)
    .await
    .expect("Failed to insert test album")
}

pub async fn create_test_song(
    db: &DatabaseConnection,
    album_id: Uuid,
    description: &str,
    position: i32,
) -> song::Model {
    song::ActiveModel {
        id: Set(Uuid::new_v4()),
        description: Set(description.to_string()),
        album_id: Set(album_id),
        position: Set(position),
    }
    .insert(db)
    .await
    .expect("Failed to insert test song")
}

/// Create an active user holding `permissions`; returns the user and its
/// bearer token
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
    permissions: &[Permission],
) -> (user::Model, String) {
    UserRepository::new(db.clone())
        .create_user(username, false, permissions)
        .await
        .expect("Failed to insert test user")
}

pub async fn create_test_superuser(db: &DatabaseConnection, username: &str) -> (user::Model, String) {
    UserRepository::new(db.clone())
        .create_user(username, true, &[])
        .await
        .expect("Failed to insert test superuser")
}
