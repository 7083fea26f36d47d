//! # deskhub-database
//!
//! PostgreSQL connection management and concrete store implementations
//! for the DeskHub identity and access-control core.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
