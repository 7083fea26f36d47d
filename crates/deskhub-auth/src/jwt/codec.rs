//! Token codec: builds and parses compact signed tokens.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Header, Validation, decode, decode_header, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use deskhub_core::config::auth::AuthConfig;
use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;
use deskhub_entity::token::{IssuedToken, TokenPair};

use crate::keys::KeyManager;

use super::claims::{AccessClaims, RefreshClaims, RegisteredClaims};
use super::validation::validate_registered_claims;

/// Signs and verifies access and refresh tokens.
///
/// The codec holds an immutable snapshot of the token configuration taken
/// at construction; nothing here mutates after startup.
#[derive(Clone)]
pub struct TokenCodec {
    /// Key manager for signing and verifier selection.
    keys: Arc<KeyManager>,
    /// Expected `iss` claim.
    issuer: String,
    /// Expected `aud` entry for access tokens.
    access_audience: String,
    /// Expected `aud` entry for refresh tokens.
    refresh_audience: String,
    /// Symmetric clock-skew tolerance in seconds.
    clock_skew_seconds: u64,
    /// Access token TTL.
    access_ttl: Duration,
    /// Refresh token TTL.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("access_audience", &self.access_audience)
            .field("refresh_audience", &self.refresh_audience)
            .finish()
    }
}

impl TokenCodec {
    /// Create a new codec from the key manager and auth configuration.
    pub fn new(keys: Arc<KeyManager>, config: &AuthConfig) -> Self {
        Self {
            keys,
            issuer: config.issuer.clone(),
            access_audience: config.access_audience.clone(),
            refresh_audience: config.refresh_audience.clone(),
            clock_skew_seconds: config.clock_skew_seconds,
            access_ttl: Duration::minutes(config.access_ttl_minutes as i64),
            refresh_ttl: Duration::days(config.refresh_ttl_days as i64),
        }
    }

    /// Sign an access token, auto-filling unset registered claims.
    pub fn issue_access_token(&self, mut claims: AccessClaims) -> AppResult<IssuedToken> {
        let now = Utc::now();
        fill_registered(
            &mut claims.registered,
            &self.issuer,
            &self.access_audience,
            self.access_ttl,
            now,
        );
        let expires_at = timestamp_to_datetime(claims.registered.exp)?;
        let token = self.encode_claims(&claims)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Sign a refresh token, auto-filling unset registered claims and
    /// normalizing the `token_id`/`jti` pair.
    ///
    /// A fresh `family_id` is minted only when the claims carry none, so a
    /// caller omits it only on first login and must thread it through on
    /// rotation.
    pub fn issue_refresh_token(&self, mut claims: RefreshClaims) -> AppResult<IssuedToken> {
        normalize_refresh_ids(&mut claims)?;
        if claims.family_id.is_empty() {
            claims.family_id = Uuid::new_v4().to_string();
        }
        let now = Utc::now();
        fill_registered(
            &mut claims.registered,
            &self.issuer,
            &self.refresh_audience,
            self.refresh_ttl,
            now,
        );
        let expires_at = timestamp_to_datetime(claims.registered.exp)?;
        let token = self.encode_claims(&claims)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Sign an access + refresh token pair for a login.
    pub fn issue_token_pair(
        &self,
        access: AccessClaims,
        refresh: RefreshClaims,
    ) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access: self.issue_access_token(access)?,
            refresh: self.issue_refresh_token(refresh)?,
        })
    }

    /// Verify an access token and return its claims.
    pub fn verify_access_token(&self, token: &str) -> AppResult<AccessClaims> {
        let claims: AccessClaims = self.decode_claims(token)?;
        validate_registered_claims(
            &claims.registered,
            &self.issuer,
            &self.access_audience,
            self.clock_skew_seconds,
            Utc::now().timestamp(),
        )?;
        Ok(claims)
    }

    /// Verify a refresh token and return its claims, with `token_id` and
    /// `jti` both populated.
    pub fn verify_refresh_token(&self, token: &str) -> AppResult<RefreshClaims> {
        let mut claims: RefreshClaims = self.decode_claims(token)?;
        validate_registered_claims(
            &claims.registered,
            &self.issuer,
            &self.refresh_audience,
            self.clock_skew_seconds,
            Utc::now().timestamp(),
        )?;
        if claims.token_id.is_empty() {
            claims.token_id = claims.registered.jti.clone();
        }
        if claims.token_id != claims.registered.jti {
            return Err(AppError::claim_validation(
                "Refresh token_id does not match jti",
            ));
        }
        Ok(claims)
    }

    /// Serialize, sign, and join the three token segments.
    fn encode_claims<C: Serialize>(&self, claims: &C) -> AppResult<String> {
        if !self.keys.can_sign() {
            return Err(AppError::configuration(
                "Token issuance refused: no signing key configured",
            ));
        }
        let key = self.keys.active_key()?;
        let mut header = Header::new(key.algorithm);
        header.kid = key.kid.clone();
        encode(&header, claims, &key.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Split, select a verifier, and check the signature over the original
    /// encoded header+payload bytes.
    fn decode_claims<C: DeserializeOwned>(&self, token: &str) -> AppResult<C> {
        if !self.keys.can_verify() {
            return Err(AppError::configuration(
                "Token verification refused: no verification keys configured",
            ));
        }
        if token.split('.').count() != 3 {
            return Err(AppError::malformed_token(
                "Token must have exactly three dot-separated segments",
            ));
        }

        let header = decode_header(token)
            .map_err(|e| AppError::malformed_token(format!("Unparseable token header: {e}")))?;

        let verifier = self.keys.select_verifier(&header).ok_or_else(|| {
            warn!(
                alg = ?header.alg,
                kid = header.kid.as_deref().unwrap_or("<none>"),
                "No verification key matches token header"
            );
            AppError::signature("No verification key matches token header")
        })?;

        let mut validation = Validation::new(verifier.algorithm);
        // Registered-claim checks are done separately with explicit skew
        // semantics; here only the signature matters.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        let data = decode::<C>(token, &verifier.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    warn!(
                        kid = verifier.kid.as_deref().unwrap_or("<none>"),
                        "Token signature mismatch"
                    );
                    AppError::signature("Token signature mismatch")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    AppError::signature("Token algorithm mismatch")
                }
                _ => AppError::malformed_token(format!("Unparseable token: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}

/// Fill unset registered claims for issuance.
fn fill_registered(
    registered: &mut RegisteredClaims,
    issuer: &str,
    audience: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) {
    if registered.iat <= 0 {
        registered.iat = now.timestamp();
    }
    if registered.nbf <= 0 {
        registered.nbf = registered.iat;
    }
    if registered.exp <= 0 {
        registered.exp = now.timestamp() + ttl.num_seconds();
    }
    if registered.iss.is_empty() {
        registered.iss = issuer.to_string();
    }
    if registered.aud.is_empty() {
        registered.aud = vec![audience.to_string()];
    }
    if registered.jti.is_empty() {
        registered.jti = Uuid::new_v4().to_string();
    }
}

/// Keep `token_id` and `jti` interchangeable: mirror whichever is set, mint
/// one id for both when neither is, and reject disagreement.
fn normalize_refresh_ids(claims: &mut RefreshClaims) -> AppResult<()> {
    let token_id = claims.token_id.clone();
    let jti = claims.registered.jti.clone();
    match (token_id.is_empty(), jti.is_empty()) {
        (true, true) => {
            let id = Uuid::new_v4().to_string();
            claims.token_id = id.clone();
            claims.registered.jti = id;
        }
        (true, false) => claims.token_id = jti,
        (false, true) => claims.registered.jti = token_id,
        (false, false) if token_id != jti => {
            return Err(AppError::validation(
                "Refresh token_id and jti disagree; supply at most one",
            ));
        }
        _ => {}
    }
    Ok(())
}

/// Convert an epoch-seconds claim to a `DateTime<Utc>`.
fn timestamp_to_datetime(seconds: i64) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| AppError::validation(format!("Timestamp {seconds} is out of range")))
}
