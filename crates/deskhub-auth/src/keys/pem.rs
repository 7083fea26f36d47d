//! RSA PEM helpers.

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;

/// Derive the public key PEM from a private key PEM.
///
/// Accepts both PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1
/// (`BEGIN RSA PRIVATE KEY`) encodings.
pub(crate) fn derive_public_key_pem(private_pem: &str) -> AppResult<String> {
    let private_key = RsaPrivateKey::from_pkcs8_pem(private_pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(private_pem))
        .map_err(|e| AppError::configuration(format!("Failed to parse RSA private key: {e}")))?;

    RsaPublicKey::from(&private_key)
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| AppError::configuration(format!("Failed to encode RSA public key: {e}")))
}
