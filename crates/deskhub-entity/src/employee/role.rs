//! Employee role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse roles carried in access tokens and the employee table.
///
/// Roles are stored and transmitted as integers; any out-of-range value
/// maps to [`EmployeeRole::Employee`], never to an error or an escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum EmployeeRole {
    /// Regular employee; fine-grained responsibility checks apply.
    Employee,
    /// Secretary; may manage bookings without responsibility checks.
    Secretary,
    /// Full administrator.
    Admin,
}

impl EmployeeRole {
    /// Return the wire/database integer for this role.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Employee => 1,
            Self::Secretary => 2,
            Self::Admin => 3,
        }
    }

    /// Whether this role bypasses the facility responsibility walk.
    pub fn is_privileged(&self) -> bool {
        !matches!(self, Self::Employee)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Secretary => "secretary",
            Self::Admin => "admin",
        }
    }
}

impl From<i32> for EmployeeRole {
    fn from(value: i32) -> Self {
        match value {
            2 => Self::Secretary,
            3 => Self::Admin,
            // 1 and everything invalid/out-of-range collapse to the
            // least-privileged role.
            _ => Self::Employee,
        }
    }
}

impl From<EmployeeRole> for i32 {
    fn from(role: EmployeeRole) -> Self {
        role.as_i32()
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = deskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee" => Ok(Self::Employee),
            "secretary" => Ok(Self::Secretary),
            "admin" => Ok(Self::Admin),
            _ => Err(deskhub_core::AppError::validation(format!(
                "Invalid employee role: '{s}'. Expected one of: employee, secretary, admin"
            ))),
        }
    }
}
