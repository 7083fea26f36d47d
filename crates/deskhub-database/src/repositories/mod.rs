//! Concrete PostgreSQL store implementations.

pub mod employee;
pub mod facility;
pub mod refresh_token;

pub use employee::EmployeeRepository;
pub use facility::FacilityRepository;
pub use refresh_token::RefreshTokenRepository;
