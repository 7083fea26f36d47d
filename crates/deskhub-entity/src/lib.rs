//! # deskhub-entity
//!
//! Domain entity models and enums for the DeskHub booking platform:
//! employees and their roles, facility targets, and issued-token value
//! types.

pub mod employee;
pub mod facility;
pub mod token;

pub use employee::{Employee, EmployeeRole};
pub use facility::FacilityRef;
pub use token::{IssuedToken, TokenPair};
