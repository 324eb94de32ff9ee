use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::server::{config::Config, error::AppError};

/// Connects to the configured database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    connect_and_migrate(&config.database_url).await
}

/// Connects to `database_url` and brings the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let db = Database::connect(connect_options(database_url)).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Pool options for `database_url`.
///
/// In-memory SQLite URLs are limited to a single pooled connection that is never
/// retired, since every new connection would open its own empty database.
fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(database_url);
    opt.sqlx_logging(false);

    if is_in_memory_sqlite(database_url) {
        opt.max_connections(1)
            .min_connections(1)
            .max_lifetime(None::<Duration>)
            .idle_timeout(None::<Duration>);
    }

    opt
}

fn is_in_memory_sqlite(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

/// Resolves once the process receives Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
