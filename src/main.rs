use anyhow::Result;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use music_catalog::{
    config::Config, create_router, db::repositories::UserRepository, state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "music_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Music Catalog...");

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    if let Some(username) = &config.admin_username {
        bootstrap_admin(&db, username).await?;
    }

    let address = config.bind_address();
    let state = AppState::new(db, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the configured superuser on first start
async fn bootstrap_admin(db: &DatabaseConnection, username: &str) -> Result<()> {
    let users = UserRepository::new(db.clone());
    if users.find_by_username(username).await?.is_some() {
        tracing::debug!(username, "Admin user already exists");
        return Ok(());
    }

    let (user, token) = users.create_user(username, true, &[]).await?;
    // Only the digest is stored, so this is the one chance to see the token
    tracing::info!(username = %user.username, %token, "Created admin user");
    Ok(())
}
