//! Refresh token ledger: server-side record of issued refresh tokens.
//!
//! A refresh token is honored only while its ledger entry exists, is bound
//! to the presenting employee, is unrevoked, and is unexpired. Revocation
//! wins over any concurrent validity check that started earlier.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;
use deskhub_core::traits::refresh_store::RefreshTokenStore;

use crate::jwt::RefreshClaims;

/// Tracks which refresh tokens are still honored.
#[derive(Clone)]
pub struct RefreshTokenLedger {
    store: Arc<dyn RefreshTokenStore>,
}

impl RefreshTokenLedger {
    pub fn new(store: Arc<dyn RefreshTokenStore>) -> Self {
        Self { store }
    }

    /// Record a freshly issued refresh token.
    ///
    /// The entry expiry mirrors the token's `exp` claim, so the sweep and
    /// the verifier agree on when the token dies.
    pub async fn record(&self, claims: &RefreshClaims) -> AppResult<()> {
        let expires_at = DateTime::from_timestamp(claims.registered.exp, 0).ok_or_else(|| {
            AppError::validation(format!(
                "Refresh claim exp {} is out of range",
                claims.registered.exp
            ))
        })?;
        self.store
            .insert(&claims.token_id, &claims.employee_id, expires_at)
            .await?;
        debug!(
            token_id = %claims.token_id,
            employee_id = %claims.employee_id,
            "Recorded refresh token"
        );
        Ok(())
    }

    /// Whether a refresh token is still honored for the given employee.
    ///
    /// Unknown tokens, tokens bound to a different employee, revoked tokens,
    /// and expired entries all answer `false`; only storage failures error.
    pub async fn is_valid(&self, token_id: &str, employee_id: &str) -> AppResult<bool> {
        let Some(record) = self.store.find(token_id).await? else {
            return Ok(false);
        };
        if record.employee_id != employee_id {
            debug!(token_id = %token_id, "Refresh token presented by wrong employee");
            return Ok(false);
        }
        if record.revoked_at.is_some() {
            return Ok(false);
        }
        if record.expires_at <= Utc::now() {
            return Ok(false);
        }
        Ok(true)
    }

    /// Revoke a single refresh token. Idempotent; revoking an unknown or
    /// already-revoked token is a no-op.
    pub async fn revoke(&self, token_id: &str) -> AppResult<()> {
        self.store.revoke(token_id, Utc::now()).await?;
        info!(token_id = %token_id, "Revoked refresh token");
        Ok(())
    }

    /// Revoke every live refresh token of an employee. Returns how many
    /// tokens were newly revoked.
    pub async fn revoke_all(&self, employee_id: &str) -> AppResult<u64> {
        let revoked = self
            .store
            .revoke_all_for_employee(&employee_id.to_string(), Utc::now())
            .await?;
        info!(
            employee_id = %employee_id,
            revoked = revoked,
            "Revoked all refresh tokens for employee"
        );
        Ok(revoked)
    }

    /// Delete entries that expired before `cutoff`. Returns how many rows
    /// were removed.
    pub async fn sweep_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let removed = self.store.delete_expired(cutoff).await?;
        if removed > 0 {
            info!(removed = removed, "Swept expired refresh token entries");
        }
        Ok(removed)
    }
}
