//! Employee model and role enumeration.

pub mod model;
pub mod role;

pub use model::Employee;
pub use role::EmployeeRole;
