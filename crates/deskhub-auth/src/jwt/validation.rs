//! Registered-claim validation.
//!
//! Pure and synchronous; the caller supplies the current UTC timestamp so
//! boundary behavior is testable without a clock.

use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;

use super::claims::RegisteredClaims;

/// Validate the registered claim set of an already signature-checked token.
///
/// Every check is mandatory and fails closed: the issuer must equal the
/// expected issuer exactly, the audience list must be non-empty and contain
/// the expected audience, `exp`/`nbf`/`iat` must be present and positive,
/// and `jti` must be non-empty.
///
/// Time bounds use a symmetric skew tolerance: a token is expired only once
/// `now > exp + skew`, and not yet valid only once `now + skew < nbf`.
pub fn validate_registered_claims(
    claims: &RegisteredClaims,
    expected_issuer: &str,
    expected_audience: &str,
    clock_skew_seconds: u64,
    now: i64,
) -> AppResult<()> {
    if claims.exp <= 0 || claims.nbf <= 0 || claims.iat <= 0 {
        return Err(AppError::claim_validation(
            "Token is missing exp, nbf, or iat",
        ));
    }
    if claims.jti.is_empty() {
        return Err(AppError::claim_validation("Token is missing jti"));
    }
    if claims.iss != expected_issuer {
        return Err(AppError::claim_validation(format!(
            "Unexpected issuer '{}'",
            claims.iss
        )));
    }
    if claims.aud.is_empty() || !claims.aud.iter().any(|a| a == expected_audience) {
        return Err(AppError::claim_validation(format!(
            "Audience does not include '{expected_audience}'"
        )));
    }

    let skew = clock_skew_seconds as i64;
    if now > claims.exp + skew {
        return Err(AppError::claim_validation("Token has expired"));
    }
    if now + skew < claims.nbf {
        return Err(AppError::claim_validation("Token is not yet valid"));
    }

    Ok(())
}
