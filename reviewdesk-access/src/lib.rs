//! Reviewdesk Access
//!
//! Request authentication and role-based capability resolution, independent
//! of any HTTP framework.

pub mod auth;

pub use auth::{
    extract_bearer_token, resolve_capabilities, resolve_for, AuthOutcome, Authenticator,
    AuthorizationError, Capability, CapabilitySet, RequestContext,
};
