//! Authentication and authorization configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Key material, token, and role configuration.
///
/// Key material arrives in three shapes: a legacy symmetric secret
/// (HMAC-SHA256, no key id), JSON maps of key-id → PEM for RSA key pairs,
/// and single-PEM shortcuts for deployments with exactly one RSA key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Legacy symmetric signing secret (HMAC-SHA256). Tokens signed with it
    /// carry no `kid` header.
    #[serde(default)]
    pub legacy_secret: Option<String>,
    /// JSON object mapping key id → RSA private key PEM.
    #[serde(default)]
    pub rsa_private_keys_json: Option<String>,
    /// JSON object mapping key id → RSA public key PEM (verification-only
    /// deployments).
    #[serde(default)]
    pub rsa_public_keys_json: Option<String>,
    /// Single RSA private key PEM shortcut. Registered under
    /// [`active_kid`](Self::active_kid) when set, otherwise under `"default"`.
    #[serde(default)]
    pub rsa_private_key_pem: Option<String>,
    /// Single RSA public key PEM shortcut.
    #[serde(default)]
    pub rsa_public_key_pem: Option<String>,
    /// Key id of the RSA private key used for new signatures. Required when
    /// more than one private key is configured.
    #[serde(default)]
    pub active_kid: Option<String>,
    /// Expected `iss` claim of every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Expected `aud` entry for access tokens.
    #[serde(default = "default_access_audience")]
    pub access_audience: String,
    /// Expected `aud` entry for refresh tokens.
    #[serde(default = "default_refresh_audience")]
    pub refresh_audience: String,
    /// Symmetric clock-skew tolerance for `exp`/`nbf` checks, in seconds.
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: u64,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Static role-token secret granting the admin role.
    #[serde(default)]
    pub admin_role_token: Option<String>,
    /// Static role-token secret granting the secretary role.
    #[serde(default)]
    pub secretary_role_token: Option<String>,
    /// Static role-token secret granting the employee role.
    #[serde(default)]
    pub employee_role_token: Option<String>,
    /// Employee ids treated as admin unconditionally. Delimiter-tolerant
    /// list: commas, semicolons, newlines, tabs, and plain whitespace all
    /// separate entries.
    #[serde(default)]
    pub admin_employee_ids: Option<String>,
}

impl AuthConfig {
    /// Parse the admin allowlist into a set, collapsing duplicates.
    pub fn admin_allowlist(&self) -> HashSet<String> {
        self.admin_employee_ids
            .as_deref()
            .map(parse_id_list)
            .unwrap_or_default()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            legacy_secret: None,
            rsa_private_keys_json: None,
            rsa_public_keys_json: None,
            rsa_private_key_pem: None,
            rsa_public_key_pem: None,
            active_kid: None,
            issuer: default_issuer(),
            access_audience: default_access_audience(),
            refresh_audience: default_refresh_audience(),
            clock_skew_seconds: default_clock_skew(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            admin_role_token: None,
            secretary_role_token: None,
            employee_role_token: None,
            admin_employee_ids: None,
        }
    }
}

/// Split an id list on any of the tolerated delimiters.
fn parse_id_list(raw: &str) -> HashSet<String> {
    raw.split([',', ';', '\n', '\r', '\t', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_issuer() -> String {
    "deskhub".to_string()
}

fn default_access_audience() -> String {
    "deskhub-access".to_string()
}

fn default_refresh_audience() -> String {
    "deskhub-refresh".to_string()
}

fn default_clock_skew() -> u64 {
    30
}

fn default_access_ttl() -> u64 {
    10
}

fn default_refresh_ttl() -> u64 {
    30
}
