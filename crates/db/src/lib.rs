//! Database layer for socialgram.
//!
//! Entities, schema migrations and repositories for users, posts, comments,
//! likes and follow edges.

pub mod entities;
pub mod error;
pub mod migrations;
pub mod repositories;
pub mod test_utils;

use socialgram_common::{AppError, Config};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;
use tracing::log::LevelFilter;

pub use repositories::Repositories;

/// Initialize database connection.
pub async fn init(config: &Config) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.database.url);

    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(config.database.sqlx_logging)
        .sqlx_logging_level(LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    info!(backend = ?db.get_database_backend(), "Connected to database");
    Ok(db)
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    migrate_up(db, None).await
}

/// Apply at most `steps` pending migrations (all when `None`).
pub async fn migrate_up(db: &DatabaseConnection, steps: Option<u32>) -> Result<(), AppError> {
    migrations::Migrator::up(db, steps)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Roll back `steps` applied migrations (all when `None`).
pub async fn rollback(db: &DatabaseConnection, steps: Option<u32>) -> Result<(), AppError> {
    migrations::Migrator::down(db, steps)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Log the applied/pending state of every migration.
pub async fn migration_status(db: &DatabaseConnection) -> Result<(), AppError> {
    migrations::Migrator::status(db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Drop every table and re-apply all migrations.
pub async fn fresh(db: &DatabaseConnection) -> Result<(), AppError> {
    migrations::Migrator::fresh(db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use socialgram_common::config::{DatabaseConfig, LoggingConfig};

    fn sqlite_config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                sqlx_logging: false,
            },
            logging: LoggingConfig::default(),
        }
    }

    async fn applied(db: &DatabaseConnection) -> usize {
        migrations::Migrator::get_applied_migrations(db)
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn test_migrate_applies_everything_and_steps_walk_back_and_forth() {
        let db = init(&sqlite_config()).await.unwrap();

        migrate(&db).await.unwrap();
        assert_eq!(applied(&db).await, 5);

        rollback(&db, Some(2)).await.unwrap();
        assert_eq!(applied(&db).await, 3);

        migrate_up(&db, Some(1)).await.unwrap();
        assert_eq!(applied(&db).await, 4);

        migrate(&db).await.unwrap();
        assert_eq!(applied(&db).await, 5);
    }
}
