//! Role resolution: static role tokens, identity extraction, and directory
//! lookup.

pub mod identity;
pub mod resolver;

pub use identity::CallerIdentity;
pub use resolver::{RoleContext, RoleResolver};
