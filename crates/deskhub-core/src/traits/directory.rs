//! Employee directory lookup trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for resolving a persisted role from a caller's identity aliases.
///
/// The aliases are tried in priority order: primary user id, then
/// team-profile id, then employee id. The raw stored role integer is
/// returned as-is; the caller clamps out-of-range values to the default
/// role.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync + 'static {
    /// Find the stored role for the first alias that matches a row.
    async fn find_role(
        &self,
        user_id: Option<&str>,
        profile_id: Option<&str>,
        employee_id: Option<&str>,
    ) -> AppResult<Option<i32>>;
}
