//! Database connection, migrations and start-up seeding
//!
//! - Opening the SQLite pool (file created on first use)
//! - Running the embedded `migrations/` directory
//! - Inserting the well-known seed user

use crate::config::{DatabaseConfig, SeedConfig};
use crate::domain::StringUuid;
use crate::repository::user::UserRepositoryImpl;
use crate::repository::UserRepository;
use crate::service::user::hash_password;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Open a connection pool, creating the database file if needed
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    info!("Database migrations completed");
    Ok(())
}

/// Insert the well-known user unless a user with that email already exists.
///
/// Returns the user's id either way.
pub async fn seed_default_user(pool: &SqlitePool, seed: &SeedConfig) -> Result<StringUuid> {
    let repo = UserRepositoryImpl::new(pool.clone());

    if let Some(existing) = repo.find_by_email(&seed.email).await? {
        info!(user_id = %existing.id, email = %seed.email, "Seed user already present");
        return Ok(existing.id);
    }

    let password_hash = hash_password(&seed.password)?;
    let user = repo
        .create(&seed.username, &seed.email, &password_hash)
        .await
        .context("Failed to create seed user")?;

    info!(user_id = %user.id, email = %seed.email, "Seed user created");
    Ok(user.id)
}
