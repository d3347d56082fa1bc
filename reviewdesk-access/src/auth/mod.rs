//! Authentication and Authorization
//!
//! - [`authenticator`]: resolves the acting identity of a request, once, from
//!   its bearer credential; never rejects
//! - [`permissions`]: pure role to capability-set mapping
//! - [`context`]: request-scoped identity slot and caller-side checks

pub mod authenticator;
pub mod context;
pub mod permissions;

pub use authenticator::{extract_bearer_token, AuthOutcome, Authenticator};
pub use context::{AuthorizationError, RequestContext};
pub use permissions::{resolve_capabilities, resolve_for, Capability, CapabilitySet};
