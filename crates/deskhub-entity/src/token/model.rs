//! Value types for issued tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A freshly signed compact token together with its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The raw compact token string (`header.payload.signature`).
    pub token: String,
    /// Expiration timestamp of the token.
    pub expires_at: DateTime<Utc>,
}

/// A pair of access and refresh tokens returned on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: IssuedToken,
    /// Long-lived refresh token.
    pub refresh: IssuedToken,
}
