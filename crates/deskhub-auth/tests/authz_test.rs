//! Integration tests for hierarchical facility authorization.

mod helpers;

use std::sync::Arc;

use deskhub_auth::FacilityAuthorizer;
use deskhub_core::error::ErrorKind;
use deskhub_entity::{EmployeeRole, FacilityRef};

use helpers::MemoryHierarchy;

/// Building 1 (responsible e1) → floor 10 (e2) → space 100 (e3) → desk 1000.
fn full_chain() -> FacilityAuthorizer {
    let hierarchy = MemoryHierarchy::new()
        .building(1, Some("e1"))
        .floor(10, 1, Some("e2"))
        .space(100, 10, Some("e3"))
        .desk(1000, 100);
    FacilityAuthorizer::new(Arc::new(hierarchy))
}

#[tokio::test]
async fn test_every_ancestor_responsible_can_manage_desk() {
    let authz = full_chain();
    let desk = FacilityRef::Desk(1000);

    for employee in ["e1", "e2", "e3"] {
        assert!(
            authz
                .can_manage(EmployeeRole::Employee, employee, desk)
                .await
                .unwrap(),
            "{employee} should manage the desk"
        );
    }

    assert!(
        !authz
            .can_manage(EmployeeRole::Employee, "other", desk)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_building_fallback_when_floor_has_no_responsible() {
    let hierarchy = MemoryHierarchy::new()
        .building(1, Some("e1"))
        .floor(10, 1, None)
        .space(100, 10, None)
        .desk(1000, 100);
    let authz = FacilityAuthorizer::new(Arc::new(hierarchy));

    for target in [
        FacilityRef::Floor(10),
        FacilityRef::Space(100),
        FacilityRef::Desk(1000),
    ] {
        assert!(
            authz
                .can_manage(EmployeeRole::Employee, "e1", target)
                .await
                .unwrap(),
            "building responsible should manage {target}"
        );
    }
}

#[tokio::test]
async fn test_space_responsible_cannot_manage_sibling_space() {
    let hierarchy = MemoryHierarchy::new()
        .building(1, None)
        .floor(10, 1, None)
        .space(100, 10, Some("e3"))
        .space(101, 10, None);
    let authz = FacilityAuthorizer::new(Arc::new(hierarchy));

    assert!(
        authz
            .can_manage(EmployeeRole::Employee, "e3", FacilityRef::Space(100))
            .await
            .unwrap()
    );
    assert!(
        !authz
            .can_manage(EmployeeRole::Employee, "e3", FacilityRef::Space(101))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_privileged_roles_skip_the_walk() {
    // Empty tree: the walk would fail with not-found if it ran at all.
    let authz = FacilityAuthorizer::new(Arc::new(MemoryHierarchy::new()));

    for role in [EmployeeRole::Secretary, EmployeeRole::Admin] {
        assert!(
            authz
                .can_manage(role, "anyone", FacilityRef::Desk(1000))
                .await
                .unwrap()
        );
    }
}

#[tokio::test]
async fn test_missing_node_is_not_found_not_denial() {
    let authz = full_chain();

    let err = authz
        .can_manage(EmployeeRole::Employee, "e1", FacilityRef::Desk(9999))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    // Broken ancestor link surfaces the same way.
    let hierarchy = MemoryHierarchy::new().desk(1000, 100);
    let authz = FacilityAuthorizer::new(Arc::new(hierarchy));
    let err = authz
        .can_manage(EmployeeRole::Employee, "e1", FacilityRef::Desk(1000))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_ensure_maps_denial_to_authorization_error() {
    let authz = full_chain();

    authz
        .ensure_can_manage(EmployeeRole::Employee, "e3", FacilityRef::Desk(1000))
        .await
        .unwrap();

    let err = authz
        .ensure_can_manage(EmployeeRole::Employee, "other", FacilityRef::Desk(1000))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(err.message.contains("other"));
    assert!(err.message.contains("desk 1000"));
}

#[tokio::test]
async fn test_bulk_check_is_all_or_nothing() {
    let hierarchy = MemoryHierarchy::new()
        .building(1, None)
        .floor(10, 1, None)
        .space(100, 10, Some("e3"))
        .space(101, 10, None)
        .desk(1000, 100)
        .desk(1001, 101);
    let authz = FacilityAuthorizer::new(Arc::new(hierarchy));

    authz
        .ensure_can_manage_all(
            EmployeeRole::Employee,
            "e3",
            &[FacilityRef::Desk(1000), FacilityRef::Space(100)],
        )
        .await
        .unwrap();

    let err = authz
        .ensure_can_manage_all(
            EmployeeRole::Employee,
            "e3",
            &[FacilityRef::Desk(1000), FacilityRef::Desk(1001)],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}
