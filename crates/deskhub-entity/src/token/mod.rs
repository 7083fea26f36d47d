//! Issued-token value types.

pub mod model;

pub use model::{IssuedToken, TokenPair};
