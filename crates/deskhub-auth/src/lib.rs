//! # deskhub-auth
//!
//! Identity and access control for the DeskHub booking platform.
//!
//! ## Modules
//!
//! - `keys`: signing/verification key management with rotation support
//! - `jwt`: compact token encoding, decoding, and claim validation
//! - `ledger`: server-side refresh-token revocation ledger
//! - `roles`: caller identity extraction and coarse role resolution
//! - `authz`: hierarchical facility authorization

pub mod authz;
pub mod jwt;
pub mod keys;
pub mod ledger;
pub mod roles;

pub use authz::FacilityAuthorizer;
pub use jwt::{AccessClaims, RefreshClaims, TokenCodec};
pub use keys::KeyManager;
pub use ledger::RefreshTokenLedger;
pub use roles::{CallerIdentity, RoleContext, RoleResolver};
