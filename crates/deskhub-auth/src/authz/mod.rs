//! Hierarchical facility authorization.

pub mod resolver;

pub use resolver::FacilityAuthorizer;
