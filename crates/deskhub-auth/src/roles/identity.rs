//! Caller identity extraction from token claim payloads.

use serde_json::Value;

/// Identity aliases extracted from a caller's claims.
///
/// External identity providers disagree on claim names, so each alias is
/// resolved from a prioritized list of known names rather than a single
/// fixed key. All fields optional; an empty identity resolves to the
/// default role downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Primary user id (`user_id`, `uid`, or `sub`).
    pub user_id: Option<String>,
    /// Team-profile id (`team_profile_id` or `profile_id`).
    pub profile_id: Option<String>,
    /// Employee id (`employee_id` or `emp_id`).
    pub employee_id: Option<String>,
}

impl CallerIdentity {
    /// Extract identity aliases from a decoded claims payload.
    ///
    /// Each alias takes the first matching claim name; string values are
    /// used as-is and integer values are stringified, anything else is
    /// ignored.
    pub fn from_claims(claims: &Value) -> Self {
        Self {
            user_id: first_string(claims, &["user_id", "uid", "sub"]),
            profile_id: first_string(claims, &["team_profile_id", "profile_id"]),
            employee_id: first_string(claims, &["employee_id", "emp_id"]),
        }
    }

    /// Identity known only by employee id.
    pub fn from_employee_id(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: Some(employee_id.into()),
            ..Self::default()
        }
    }

    /// Whether no alias at all is present.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.profile_id.is_none() && self.employee_id.is_none()
    }
}

/// First non-empty string (or stringified integer) among the named claims.
fn first_string(claims: &Value, names: &[&str]) -> Option<String> {
    for name in names {
        match claims.get(name) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}
