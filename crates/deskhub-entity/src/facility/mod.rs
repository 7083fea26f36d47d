//! Facility target types for authorization checks.

pub mod target;

pub use target::FacilityRef;
