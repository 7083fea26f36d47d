//! Compact token encoding, decoding, and claim validation.

pub mod claims;
pub mod codec;
pub mod validation;

pub use claims::{AccessClaims, RefreshClaims, RegisteredClaims, Responsibilities};
pub use codec::TokenCodec;
