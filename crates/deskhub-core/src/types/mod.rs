//! Shared type aliases used across DeskHub crates.

pub mod id;

pub use id::{EmployeeId, FacilityId};
