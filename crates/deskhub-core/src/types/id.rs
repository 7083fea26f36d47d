//! Typed identifier aliases.
//!
//! Employee identifiers come from the corporate directory and are opaque
//! strings (numeric for most staff, alphanumeric for contractors).
//! Facility identifiers are database primary keys.

/// Identifier of an employee in the corporate directory.
pub type EmployeeId = String;

/// Primary-key identifier of a building, floor, coworking space, or desk.
pub type FacilityId = i64;
