//! Signing and verification key management.

pub mod manager;
mod pem;

pub use manager::{KeyManager, SigningKey, VerificationKey};
