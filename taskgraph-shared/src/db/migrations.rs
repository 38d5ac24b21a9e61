/// Database migration runner
///
/// Runs the sqlx migrations embedded from the `migrations/` directory at
/// this crate's root. Each migration is a pair of files:
/// `{version}_{name}.sql` (up) and `{version}_{name}.down.sql` (rollback).
///
/// The session table is not managed here; it is created by the
/// tower-sessions Postgres store's own migration at startup.
///
/// # Example
///
/// ```no_run
/// use taskgraph_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskgraph_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations that fail are rolled back where Postgres allows it and the
/// error is returned.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the connection is
/// lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
