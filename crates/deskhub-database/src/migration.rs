//! Embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use deskhub_core::error::{AppError, ErrorKind};
use deskhub_core::result::AppResult;

/// Migrations compiled in from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the schema up to date.
///
/// Already-applied migrations are skipped, so running this on every
/// startup is safe.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Schema migration failed", e))?;

    info!(
        known = MIGRATOR.migrations.len(),
        "Database schema is up to date"
    );
    Ok(())
}
