//! Upward responsibility walk over the facility hierarchy.

use std::sync::Arc;

use tracing::debug;

use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;
use deskhub_core::traits::hierarchy::HierarchyStore;
use deskhub_entity::{EmployeeRole, FacilityRef};

/// Decides whether an employee may manage a facility node.
///
/// Privileged roles manage everything. An ordinary employee manages a node
/// when a responsibility edge on the node or any of its ancestors names
/// them. Desks carry no edge of their own, so desk checks start at the
/// owning space.
#[derive(Clone)]
pub struct FacilityAuthorizer {
    hierarchy: Arc<dyn HierarchyStore>,
}

impl FacilityAuthorizer {
    pub fn new(hierarchy: Arc<dyn HierarchyStore>) -> Self {
        Self { hierarchy }
    }

    /// Whether `employee_id` with `role` may manage `target`.
    ///
    /// A missing node anywhere on the walk is a not-found error, never a
    /// silent denial.
    pub async fn can_manage(
        &self,
        role: EmployeeRole,
        employee_id: &str,
        target: FacilityRef,
    ) -> AppResult<bool> {
        if role.is_privileged() {
            return Ok(true);
        }

        let mut cursor = target;
        loop {
            match cursor {
                FacilityRef::Desk(id) => {
                    let desk = self.hierarchy.find_desk(id).await?.ok_or_else(|| {
                        AppError::not_found(format!("Desk {id} does not exist"))
                    })?;
                    cursor = FacilityRef::Space(desk.space_id);
                }
                FacilityRef::Space(id) => {
                    let space = self.hierarchy.find_space(id).await?.ok_or_else(|| {
                        AppError::not_found(format!("Coworking space {id} does not exist"))
                    })?;
                    if is_responsible(space.responsible_employee_id.as_deref(), employee_id) {
                        return Ok(true);
                    }
                    cursor = FacilityRef::Floor(space.floor_id);
                }
                FacilityRef::Floor(id) => {
                    let floor = self.hierarchy.find_floor(id).await?.ok_or_else(|| {
                        AppError::not_found(format!("Floor {id} does not exist"))
                    })?;
                    if is_responsible(floor.responsible_employee_id.as_deref(), employee_id) {
                        return Ok(true);
                    }
                    cursor = FacilityRef::Building(floor.building_id);
                }
                FacilityRef::Building(id) => {
                    let building = self.hierarchy.find_building(id).await?.ok_or_else(|| {
                        AppError::not_found(format!("Building {id} does not exist"))
                    })?;
                    return Ok(is_responsible(
                        building.responsible_employee_id.as_deref(),
                        employee_id,
                    ));
                }
            }
        }
    }

    /// Like [`can_manage`](Self::can_manage) but denial is an error.
    pub async fn ensure_can_manage(
        &self,
        role: EmployeeRole,
        employee_id: &str,
        target: FacilityRef,
    ) -> AppResult<()> {
        if self.can_manage(role, employee_id, target).await? {
            Ok(())
        } else {
            debug!(employee_id = %employee_id, target = %target, "Management denied");
            Err(AppError::authorization(format!(
                "Employee {employee_id} is not allowed to manage {target}"
            )))
        }
    }

    /// All-or-nothing check over a batch of targets. The first missing node
    /// or denial fails the whole batch.
    pub async fn ensure_can_manage_all(
        &self,
        role: EmployeeRole,
        employee_id: &str,
        targets: &[FacilityRef],
    ) -> AppResult<()> {
        for target in targets {
            self.ensure_can_manage(role, employee_id, *target).await?;
        }
        Ok(())
    }
}

fn is_responsible(responsible: Option<&str>, employee_id: &str) -> bool {
    responsible.is_some_and(|r| r == employee_id)
}
