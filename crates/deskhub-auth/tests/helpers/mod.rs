//! Shared in-memory fakes for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;
use deskhub_core::traits::hierarchy::{
    BuildingNode, DeskNode, FloorNode, HierarchyStore, SpaceNode,
};
use deskhub_core::traits::refresh_store::{RefreshTokenRecord, RefreshTokenStore};
use deskhub_core::types::{EmployeeId, FacilityId};

/// In-memory refresh-token store with the same contract as the database
/// repository.
#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    records: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn insert(
        &self,
        token_id: &str,
        employee_id: &EmployeeId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(token_id) {
            return Err(AppError::conflict(format!(
                "Refresh token {token_id} already recorded"
            )));
        }
        records.insert(
            token_id.to_string(),
            RefreshTokenRecord {
                token_id: token_id.to_string(),
                employee_id: employee_id.clone(),
                expires_at,
                revoked_at: None,
            },
        );
        Ok(())
    }

    async fn find(&self, token_id: &str) -> AppResult<Option<RefreshTokenRecord>> {
        Ok(self.records.lock().unwrap().get(token_id).cloned())
    }

    async fn revoke(&self, token_id: &str, revoked_at: DateTime<Utc>) -> AppResult<()> {
        if let Some(record) = self.records.lock().unwrap().get_mut(token_id) {
            if record.revoked_at.is_none() {
                record.revoked_at = Some(revoked_at);
            }
        }
        Ok(())
    }

    async fn revoke_all_for_employee(
        &self,
        employee_id: &EmployeeId,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut revoked = 0;
        for record in self.records.lock().unwrap().values_mut() {
            if &record.employee_id == employee_id && record.revoked_at.is_none() {
                record.revoked_at = Some(revoked_at);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|_, record| record.expires_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}

/// In-memory facility tree built up with chained helpers.
#[derive(Default)]
pub struct MemoryHierarchy {
    buildings: HashMap<FacilityId, BuildingNode>,
    floors: HashMap<FacilityId, FloorNode>,
    spaces: HashMap<FacilityId, SpaceNode>,
    desks: HashMap<FacilityId, DeskNode>,
}

impl MemoryHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn building(mut self, id: FacilityId, responsible: Option<&str>) -> Self {
        self.buildings.insert(
            id,
            BuildingNode {
                id,
                responsible_employee_id: responsible.map(str::to_string),
            },
        );
        self
    }

    pub fn floor(mut self, id: FacilityId, building_id: FacilityId, responsible: Option<&str>) -> Self {
        self.floors.insert(
            id,
            FloorNode {
                id,
                building_id,
                responsible_employee_id: responsible.map(str::to_string),
            },
        );
        self
    }

    pub fn space(mut self, id: FacilityId, floor_id: FacilityId, responsible: Option<&str>) -> Self {
        self.spaces.insert(
            id,
            SpaceNode {
                id,
                floor_id,
                responsible_employee_id: responsible.map(str::to_string),
            },
        );
        self
    }

    pub fn desk(mut self, id: FacilityId, space_id: FacilityId) -> Self {
        self.desks.insert(id, DeskNode { id, space_id });
        self
    }
}

#[async_trait]
impl HierarchyStore for MemoryHierarchy {
    async fn find_building(&self, id: FacilityId) -> AppResult<Option<BuildingNode>> {
        Ok(self.buildings.get(&id).cloned())
    }

    async fn find_floor(&self, id: FacilityId) -> AppResult<Option<FloorNode>> {
        Ok(self.floors.get(&id).cloned())
    }

    async fn find_space(&self, id: FacilityId) -> AppResult<Option<SpaceNode>> {
        Ok(self.spaces.get(&id).cloned())
    }

    async fn find_desk(&self, id: FacilityId) -> AppResult<Option<DeskNode>> {
        Ok(self.desks.get(&id).cloned())
    }
}

/// In-memory employee directory keyed by each alias separately.
#[derive(Default)]
pub struct MemoryDirectory {
    by_user_id: HashMap<String, i32>,
    by_profile_id: HashMap<String, i32>,
    by_employee_id: HashMap<String, i32>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: &str, role: i32) -> Self {
        self.by_user_id.insert(user_id.to_string(), role);
        self
    }

    pub fn with_profile(mut self, profile_id: &str, role: i32) -> Self {
        self.by_profile_id.insert(profile_id.to_string(), role);
        self
    }

    pub fn with_employee(mut self, employee_id: &str, role: i32) -> Self {
        self.by_employee_id.insert(employee_id.to_string(), role);
        self
    }
}

#[async_trait]
impl deskhub_core::traits::directory::EmployeeDirectory for MemoryDirectory {
    async fn find_role(
        &self,
        user_id: Option<&str>,
        profile_id: Option<&str>,
        employee_id: Option<&str>,
    ) -> AppResult<Option<i32>> {
        if let Some(role) = user_id.and_then(|id| self.by_user_id.get(id)) {
            return Ok(Some(*role));
        }
        if let Some(role) = profile_id.and_then(|id| self.by_profile_id.get(id)) {
            return Ok(Some(*role));
        }
        if let Some(role) = employee_id.and_then(|id| self.by_employee_id.get(id)) {
            return Ok(Some(*role));
        }
        Ok(None)
    }
}
