//! Facility hierarchy storage trait.
//!
//! Buildings are roots; floors belong to exactly one building; coworking
//! spaces belong to exactly one floor; desks belong to exactly one
//! coworking space. Buildings, floors, and spaces may each name one
//! responsible employee; desks never do.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{EmployeeId, FacilityId};

/// A building node with its responsibility edge.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BuildingNode {
    /// Primary key.
    pub id: FacilityId,
    /// The employee delegated to manage this building, if any.
    pub responsible_employee_id: Option<EmployeeId>,
}

/// A floor node with its parent building and responsibility edge.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FloorNode {
    /// Primary key.
    pub id: FacilityId,
    /// The building this floor belongs to.
    pub building_id: FacilityId,
    /// The employee delegated to manage this floor, if any.
    pub responsible_employee_id: Option<EmployeeId>,
}

/// A coworking-space node with its parent floor and responsibility edge.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SpaceNode {
    /// Primary key.
    pub id: FacilityId,
    /// The floor this space belongs to.
    pub floor_id: FacilityId,
    /// The employee delegated to manage this space, if any.
    pub responsible_employee_id: Option<EmployeeId>,
}

/// A desk node. Desks carry no responsibility edge of their own.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeskNode {
    /// Primary key.
    pub id: FacilityId,
    /// The coworking space this desk belongs to.
    pub space_id: FacilityId,
}

/// Trait for reading the facility tree and its responsibility edges.
#[async_trait]
pub trait HierarchyStore: Send + Sync + 'static {
    /// Look up a building by id.
    async fn find_building(&self, id: FacilityId) -> AppResult<Option<BuildingNode>>;

    /// Look up a floor by id.
    async fn find_floor(&self, id: FacilityId) -> AppResult<Option<FloorNode>>;

    /// Look up a coworking space by id.
    async fn find_space(&self, id: FacilityId) -> AppResult<Option<SpaceNode>>;

    /// Look up a desk by id.
    async fn find_desk(&self, id: FacilityId) -> AppResult<Option<DeskNode>>;
}
