/// Database migration runner
///
/// Migrations live in the `migrations/` directory at this crate's root and
/// are embedded at compile time via `sqlx::migrate!`. Each migration has an
/// up file (`{version}_{name}.sql`) and a down file
/// (`{version}_{name}.down.sql`).
///
/// # Example
///
/// ```no_run
/// use taskforge_shared::db::migrations::run_migrations;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the connection is
/// lost mid-run; a failed migration is rolled back.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
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
