//! Key manager: one active signing key, many verification keys.
//!
//! The manager is populated once at startup from [`AuthConfig`] and never
//! mutated afterwards, so it is safe for unsynchronized concurrent reads.

use std::collections::{BTreeMap, HashMap};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};

use deskhub_core::config::auth::AuthConfig;
use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;

use super::pem::derive_public_key_pem;

/// Key id used when a single-PEM shortcut is configured without an
/// explicit active key id.
const DEFAULT_KID: &str = "default";

/// The key used for new signatures.
#[derive(Clone)]
pub struct SigningKey {
    /// Signing algorithm (HS256 for the legacy secret, RS256 otherwise).
    pub algorithm: Algorithm,
    /// Key id emitted in token headers. `None` for the legacy secret.
    pub kid: Option<String>,
    /// The jsonwebtoken encoding key.
    pub encoding_key: EncodingKey,
}

/// A key usable for signature verification.
#[derive(Clone)]
pub struct VerificationKey {
    /// Key id this verifier is registered under. `None` for the legacy
    /// no-kid HMAC verifier.
    pub kid: Option<String>,
    /// The algorithm this key verifies. A header claiming a different
    /// algorithm never matches this key.
    pub algorithm: Algorithm,
    /// The jsonwebtoken decoding key.
    pub decoding_key: DecodingKey,
}

/// Holds the active signing key and the verification key set.
#[derive(Clone)]
pub struct KeyManager {
    /// The single active signing key, if any.
    signing: Option<SigningKey>,
    /// Verification keys indexed by key id.
    verifiers: HashMap<String, VerificationKey>,
    /// Legacy no-kid HMAC verifier for tokens issued before key-id support.
    legacy: Option<VerificationKey>,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("active_kid", &self.signing.as_ref().map(|k| k.kid.clone()))
            .field("verifier_kids", &self.verifiers.keys().collect::<Vec<_>>())
            .field("has_legacy", &self.legacy.is_some())
            .finish()
    }
}

impl KeyManager {
    /// Build the key manager from configuration.
    ///
    /// Fails fast on malformed key JSON, malformed PEM, or an ambiguous
    /// active key: configuring more than one RSA private key without an
    /// explicit active key id is a fatal configuration error.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        let shortcut_kid = config
            .active_kid
            .clone()
            .unwrap_or_else(|| DEFAULT_KID.to_string());

        let mut private_pems =
            parse_pem_map(config.rsa_private_keys_json.as_deref(), "rsa_private_keys_json")?;
        if let Some(pem) = &config.rsa_private_key_pem {
            if private_pems
                .insert(shortcut_kid.clone(), pem.clone())
                .is_some()
            {
                return Err(AppError::configuration(format!(
                    "Private key id '{shortcut_kid}' is configured both in the key map \
                     and as a single-PEM shortcut"
                )));
            }
        }

        let mut public_pems =
            parse_pem_map(config.rsa_public_keys_json.as_deref(), "rsa_public_keys_json")?;
        if let Some(pem) = &config.rsa_public_key_pem {
            if public_pems
                .insert(shortcut_kid.clone(), pem.clone())
                .is_some()
            {
                return Err(AppError::configuration(format!(
                    "Public key id '{shortcut_kid}' is configured both in the key map \
                     and as a single-PEM shortcut"
                )));
            }
        }

        let active_kid = select_active_kid(&private_pems, config.active_kid.as_deref())?;
        let legacy_secret = config.legacy_secret.as_deref().filter(|s| !s.is_empty());

        let signing = if let Some(kid) = &active_kid {
            let pem = &private_pems[kid];
            let encoding_key = EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                AppError::configuration(format!("Invalid RSA private key '{kid}': {e}"))
            })?;
            Some(SigningKey {
                algorithm: Algorithm::RS256,
                kid: Some(kid.clone()),
                encoding_key,
            })
        } else {
            legacy_secret.map(|secret| SigningKey {
                algorithm: Algorithm::HS256,
                kid: None,
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            })
        };

        let mut verifiers = HashMap::new();
        for (kid, pem) in &public_pems {
            let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                AppError::configuration(format!("Invalid RSA public key '{kid}': {e}"))
            })?;
            verifiers.insert(
                kid.clone(),
                VerificationKey {
                    kid: Some(kid.clone()),
                    algorithm: Algorithm::RS256,
                    decoding_key,
                },
            );
        }
        for (kid, pem) in &private_pems {
            // A standalone public key for the same kid takes precedence
            // over derivation.
            if verifiers.contains_key(kid) {
                continue;
            }
            let public_pem = derive_public_key_pem(pem)?;
            let decoding_key = DecodingKey::from_rsa_pem(public_pem.as_bytes()).map_err(|e| {
                AppError::configuration(format!("Invalid derived public key '{kid}': {e}"))
            })?;
            verifiers.insert(
                kid.clone(),
                VerificationKey {
                    kid: Some(kid.clone()),
                    algorithm: Algorithm::RS256,
                    decoding_key,
                },
            );
        }

        let legacy = legacy_secret.map(|secret| VerificationKey {
            kid: None,
            algorithm: Algorithm::HS256,
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        });

        Ok(Self {
            signing,
            verifiers,
            legacy,
        })
    }

    /// Whether a usable signing key is configured.
    pub fn can_sign(&self) -> bool {
        self.signing.is_some()
    }

    /// Whether at least one verification key is configured.
    pub fn can_verify(&self) -> bool {
        !self.verifiers.is_empty() || self.legacy.is_some()
    }

    /// The active signing key.
    pub fn active_key(&self) -> AppResult<&SigningKey> {
        self.signing
            .as_ref()
            .ok_or_else(|| AppError::configuration("No signing key configured"))
    }

    /// Select the verification key matching a parsed token header.
    ///
    /// A present key id must exist **and** its configured algorithm must
    /// match the header's claimed algorithm. A missing key id matches only
    /// the legacy HMAC verifier, and only for HS256; an RSA-tagged header
    /// never falls back to an unkeyed lookup.
    pub fn select_verifier(&self, header: &Header) -> Option<&VerificationKey> {
        match header.kid.as_deref() {
            Some(kid) => self
                .verifiers
                .get(kid)
                .filter(|key| key.algorithm == header.alg),
            None => self
                .legacy
                .as_ref()
                .filter(|_| header.alg == Algorithm::HS256),
        }
    }
}

/// Parse a JSON object of key id → PEM.
fn parse_pem_map(raw: Option<&str>, field: &str) -> AppResult<BTreeMap<String, String>> {
    match raw {
        None => Ok(BTreeMap::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| AppError::configuration(format!("Malformed JSON in {field}: {e}"))),
    }
}

/// Decide which private key signs new tokens.
fn select_active_kid(
    private_pems: &BTreeMap<String, String>,
    configured: Option<&str>,
) -> AppResult<Option<String>> {
    if private_pems.is_empty() {
        return Ok(None);
    }
    match configured {
        Some(kid) => {
            if private_pems.contains_key(kid) {
                Ok(Some(kid.to_string()))
            } else {
                Err(AppError::configuration(format!(
                    "Active key id '{kid}' does not match any configured private key \
                     (configured: {})",
                    kid_list(private_pems)
                )))
            }
        }
        None if private_pems.len() == 1 => {
            Ok(private_pems.keys().next().cloned())
        }
        None => Err(AppError::configuration(format!(
            "Multiple RSA private keys configured ({}) but no active key id set",
            kid_list(private_pems)
        ))),
    }
}

fn kid_list(pems: &BTreeMap<String, String>) -> String {
    pems.keys().cloned().collect::<Vec<_>>().join(", ")
}
