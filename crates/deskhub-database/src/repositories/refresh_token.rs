//! Refresh-token ledger repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use deskhub_core::error::{AppError, ErrorKind};
use deskhub_core::result::AppResult;
use deskhub_core::traits::{RefreshTokenRecord, RefreshTokenStore};
use deskhub_core::types::EmployeeId;

/// PostgreSQL-backed refresh-token ledger.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn insert(
        &self,
        token_id: &str,
        employee_id: &EmployeeId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (token_id, employee_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token_id)
        .bind(employee_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                AppError::conflict(format!("Refresh token '{token_id}' already recorded"))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
            }
        })?;
        Ok(())
    }

    async fn find(&self, token_id: &str) -> AppResult<Option<RefreshTokenRecord>> {
        let row = sqlx::query_as::<_, (String, String, DateTime<Utc>, Option<DateTime<Utc>>)>(
            "SELECT token_id, employee_id, expires_at, revoked_at \
             FROM refresh_tokens WHERE token_id = $1",
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
        })?;

        Ok(row.map(
            |(token_id, employee_id, expires_at, revoked_at)| RefreshTokenRecord {
                token_id,
                employee_id,
                expires_at,
                revoked_at,
            },
        ))
    }

    async fn revoke(&self, token_id: &str, revoked_at: DateTime<Utc>) -> AppResult<()> {
        // Monotonic: an already-set revoked_at is never overwritten, and a
        // missing row is not an error.
        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 \
             WHERE token_id = $1 AND revoked_at IS NULL",
        )
        .bind(token_id)
        .bind(revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        Ok(())
    }

    async fn revoke_all_for_employee(
        &self,
        employee_id: &EmployeeId,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 \
             WHERE employee_id = $1 AND revoked_at IS NULL",
        )
        .bind(employee_id)
        .bind(revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to revoke refresh tokens for employee",
                e,
            )
        })?;
        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete expired refresh tokens",
                    e,
                )
            })?;
        Ok(result.rows_affected())
    }
}
