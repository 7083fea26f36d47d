//! Store traits defined in `deskhub-core` and implemented by other crates.
//!
//! The PostgreSQL implementations live in `deskhub-database`; tests use
//! in-memory fakes.

pub mod directory;
pub mod hierarchy;
pub mod refresh_store;

pub use directory::EmployeeDirectory;
pub use hierarchy::{BuildingNode, DeskNode, FloorNode, HierarchyStore, SpaceNode};
pub use refresh_store::{RefreshTokenRecord, RefreshTokenStore};
