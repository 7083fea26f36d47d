//! Claim structures for access and refresh tokens.

use serde::{Deserialize, Serialize};

use deskhub_core::types::FacilityId;
use deskhub_entity::EmployeeRole;

/// Registered claims shared by both token kinds.
///
/// All fields default when absent from an incoming payload; validation then
/// rejects the zero/empty defaults, so a missing field fails closed rather
/// than failing deserialization half-way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisteredClaims {
    /// Issuer.
    #[serde(default)]
    pub iss: String,
    /// Audience list.
    #[serde(default)]
    pub aud: Vec<String>,
    /// Expiration (seconds since epoch).
    #[serde(default)]
    pub exp: i64,
    /// Not-before (seconds since epoch).
    #[serde(default)]
    pub nbf: i64,
    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Unique token id.
    #[serde(default)]
    pub jti: String,
}

/// Facility ids the subject is delegated to manage, snapshotted at
/// issuance time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Responsibilities {
    /// Buildings the subject is responsible for.
    #[serde(default)]
    pub buildings: Vec<FacilityId>,
    /// Floors the subject is responsible for.
    #[serde(default)]
    pub floors: Vec<FacilityId>,
    /// Coworking spaces the subject is responsible for.
    #[serde(default)]
    pub coworkings: Vec<FacilityId>,
}

/// Claims payload of a short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The authenticated employee.
    pub employee_id: String,
    /// Display name of the employee.
    pub user_name: String,
    /// Coarse role at issuance time, as an integer on the wire.
    pub role: EmployeeRole,
    /// Delegated facility ids, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Responsibilities>,
    /// Registered claims.
    #[serde(flatten)]
    pub registered: RegisteredClaims,
}

impl AccessClaims {
    /// Minimal claims for an employee; the codec fills the registered set
    /// at issuance.
    pub fn new(employee_id: impl Into<String>, user_name: impl Into<String>, role: EmployeeRole) -> Self {
        Self {
            employee_id: employee_id.into(),
            user_name: user_name.into(),
            role,
            responsibilities: None,
            registered: RegisteredClaims::default(),
        }
    }
}

/// Claims payload of a long-lived refresh token.
///
/// `token_id` keys the server-side ledger record and always equals `jti`
/// after normalization; `family_id` groups every refresh token descending
/// from one original login so a suspected compromise can revoke the whole
/// family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// The authenticated employee.
    pub employee_id: String,
    /// Ledger record key; interchangeable with `jti`.
    #[serde(default)]
    pub token_id: String,
    /// Token family for replay containment.
    #[serde(default)]
    pub family_id: String,
    /// Registered claims.
    #[serde(flatten)]
    pub registered: RegisteredClaims,
}

impl RefreshClaims {
    /// Minimal claims for a first login; the codec mints token, family,
    /// and registered ids at issuance.
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            token_id: String::new(),
            family_id: String::new(),
            registered: RegisteredClaims::default(),
        }
    }

    /// Claims for a rotation within an existing family.
    pub fn in_family(employee_id: impl Into<String>, family_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            token_id: String::new(),
            family_id: family_id.into(),
            registered: RegisteredClaims::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_as_int() {
        let claims = AccessClaims::new("e-1", "Jordan", EmployeeRole::Secretary);
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["role"], 2);
        assert!(value.get("responsibilities").is_none());
    }

    #[test]
    fn test_registered_claims_default_when_absent() {
        let claims: AccessClaims = serde_json::from_value(serde_json::json!({
            "employee_id": "e-1",
            "user_name": "Jordan",
            "role": 1,
        }))
        .unwrap();
        assert_eq!(claims.registered.exp, 0);
        assert!(claims.registered.jti.is_empty());
        assert!(claims.registered.aud.is_empty());
    }

    #[test]
    fn test_refresh_claims_flattened_registered() {
        let claims = RefreshClaims {
            employee_id: "e-1".to_string(),
            token_id: "t-1".to_string(),
            family_id: "f-1".to_string(),
            registered: RegisteredClaims {
                iss: "deskhub".to_string(),
                jti: "t-1".to_string(),
                ..RegisteredClaims::default()
            },
        };
        let value = serde_json::to_value(&claims).unwrap();
        // Flattened, not nested.
        assert_eq!(value["iss"], "deskhub");
        assert!(value.get("registered").is_none());
    }
}
