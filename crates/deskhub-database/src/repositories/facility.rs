//! Facility hierarchy repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use deskhub_core::error::{AppError, ErrorKind};
use deskhub_core::result::AppResult;
use deskhub_core::traits::{BuildingNode, DeskNode, FloorNode, HierarchyStore, SpaceNode};
use deskhub_core::types::FacilityId;

/// Repository for reading facility nodes and their responsibility edges.
#[derive(Debug, Clone)]
pub struct FacilityRepository {
    pool: PgPool,
}

impl FacilityRepository {
    /// Create a new facility repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HierarchyStore for FacilityRepository {
    async fn find_building(&self, id: FacilityId) -> AppResult<Option<BuildingNode>> {
        let row = sqlx::query_as::<_, (i64, Option<String>)>(
            "SELECT id, responsible_employee_id FROM buildings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find building", e))?;

        Ok(row.map(|(id, responsible_employee_id)| BuildingNode {
            id,
            responsible_employee_id,
        }))
    }

    async fn find_floor(&self, id: FacilityId) -> AppResult<Option<FloorNode>> {
        let row = sqlx::query_as::<_, (i64, i64, Option<String>)>(
            "SELECT id, building_id, responsible_employee_id FROM floors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find floor", e))?;

        Ok(
            row.map(|(id, building_id, responsible_employee_id)| FloorNode {
                id,
                building_id,
                responsible_employee_id,
            }),
        )
    }

    async fn find_space(&self, id: FacilityId) -> AppResult<Option<SpaceNode>> {
        let row = sqlx::query_as::<_, (i64, i64, Option<String>)>(
            "SELECT id, floor_id, responsible_employee_id FROM coworking_spaces WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find coworking space", e)
        })?;

        Ok(row.map(|(id, floor_id, responsible_employee_id)| SpaceNode {
            id,
            floor_id,
            responsible_employee_id,
        }))
    }

    async fn find_desk(&self, id: FacilityId) -> AppResult<Option<DeskNode>> {
        let row = sqlx::query_as::<_, (i64, i64)>(
            "SELECT id, coworking_space_id FROM desks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find desk", e))?;

        Ok(row.map(|(id, space_id)| DeskNode { id, space_id }))
    }
}
