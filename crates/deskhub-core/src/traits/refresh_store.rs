//! Refresh-token ledger storage trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::EmployeeId;

/// A persisted refresh-token record.
///
/// Created on issuance, mutated only to set `revoked_at` (monotonic: once
/// revoked, always revoked), deleted by the periodic expiry sweep.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshTokenRecord {
    /// The token id (equal to the token's `jti` after normalization).
    pub token_id: String,
    /// The employee the token was issued to.
    pub employee_id: EmployeeId,
    /// Hard expiry of the token.
    pub expires_at: DateTime<Utc>,
    /// When the token was revoked server-side, if ever.
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Trait for the durable refresh-token ledger.
///
/// Implementations must treat revocation as a one-way transition: no
/// operation un-revokes a token. `revoke` on an already-revoked or unknown
/// token id is a no-op, not an error.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Insert a new record. A duplicate token id is a caller error and must
    /// surface as a conflict, never a silent merge.
    async fn insert(
        &self,
        token_id: &str,
        employee_id: &EmployeeId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Look up a record by token id.
    async fn find(&self, token_id: &str) -> AppResult<Option<RefreshTokenRecord>>;

    /// Mark a record revoked. Idempotent; never clears an earlier
    /// `revoked_at`.
    async fn revoke(&self, token_id: &str, revoked_at: DateTime<Utc>) -> AppResult<()>;

    /// Revoke every non-revoked record for an employee. Returns the number
    /// of records newly revoked.
    async fn revoke_all_for_employee(
        &self,
        employee_id: &EmployeeId,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Delete records whose expiry has passed. Returns the number deleted.
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}
