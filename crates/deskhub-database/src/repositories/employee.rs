//! Employee directory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use deskhub_core::error::{AppError, ErrorKind};
use deskhub_core::result::AppResult;
use deskhub_core::traits::EmployeeDirectory;
use deskhub_entity::Employee;

/// Repository for employee lookups by identity alias.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an employee by corporate login user id.
    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find employee by user id", e)
            })
    }

    /// Find an employee by team-profile id.
    pub async fn find_by_profile_id(&self, profile_id: &str) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE team_profile_id = $1")
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find employee by profile id",
                    e,
                )
            })
    }

    /// Find an employee by employee id.
    pub async fn find_by_employee_id(&self, employee_id: &str) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = $1")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find employee by employee id",
                    e,
                )
            })
    }

    /// Find an employee by any identity alias, in priority order:
    /// user id, then team-profile id, then employee id.
    pub async fn find_by_any_alias(
        &self,
        user_id: Option<&str>,
        profile_id: Option<&str>,
        employee_id: Option<&str>,
    ) -> AppResult<Option<Employee>> {
        if let Some(id) = user_id {
            if let Some(employee) = self.find_by_user_id(id).await? {
                return Ok(Some(employee));
            }
        }
        if let Some(id) = profile_id {
            if let Some(employee) = self.find_by_profile_id(id).await? {
                return Ok(Some(employee));
            }
        }
        if let Some(id) = employee_id {
            if let Some(employee) = self.find_by_employee_id(id).await? {
                return Ok(Some(employee));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl EmployeeDirectory for EmployeeRepository {
    async fn find_role(
        &self,
        user_id: Option<&str>,
        profile_id: Option<&str>,
        employee_id: Option<&str>,
    ) -> AppResult<Option<i32>> {
        let employee = self
            .find_by_any_alias(user_id, profile_id, employee_id)
            .await?;
        Ok(employee.map(|e| e.role))
    }
}
