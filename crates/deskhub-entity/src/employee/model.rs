//! Employee row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::EmployeeRole;

/// A row in the employees table.
///
/// An employee is addressable by several identity aliases: the corporate
/// login user id, the team-profile id, and the employee id proper. Lookups
/// try them in that priority order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    /// Primary key.
    pub id: i64,
    /// The employee id used in tokens and responsibility edges.
    pub employee_id: String,
    /// Corporate login user id, if linked.
    pub user_id: Option<String>,
    /// Team-profile id, if linked.
    pub team_profile_id: Option<String>,
    /// Display name carried into access-token claims.
    pub user_name: String,
    /// Stored role integer. Out-of-range values degrade to the default
    /// role at resolution time.
    pub role: i32,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// The stored role, clamped to a valid [`EmployeeRole`].
    pub fn employee_role(&self) -> EmployeeRole {
        EmployeeRole::from(self.role)
    }
}
