//! Request Context
//!
//! Per-request holder for the resolved identity. Created empty at the start
//! of every request and passed explicitly down the handling chain.

use super::permissions::{resolve_for, Capability, CapabilitySet};
use reviewdesk_core::Identity;
use thiserror::Error;

/// Request-scoped authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: Option<Identity>,
}

/// Why a caller-side authorization check failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Account '{user_id}' is banned")]
    Banned { user_id: String },
    #[error("Identity '{user_id}' lacks capability '{capability}'")]
    Forbidden {
        user_id: String,
        capability: Capability,
    },
}

impl RequestContext {
    /// Fresh context with no identity
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with an identity already attached
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Replace the identity slot; `None` leaves the request anonymous
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
    }

    /// Current identity for this request, if any
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn into_identity(self) -> Option<Identity> {
        self.identity
    }

    pub fn is_anonymous(&self) -> bool {
        self.identity.is_none()
    }

    /// Get user ID if available
    pub fn user_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.id.as_str())
    }

    /// Capabilities of the current identity (anonymous resolves as a standard user)
    pub fn capabilities(&self) -> CapabilitySet {
        resolve_for(self.identity.as_ref())
    }

    /// Require an authenticated, non-banned identity
    pub fn require_identity(&self) -> Result<&Identity, AuthorizationError> {
        let identity = self
            .identity
            .as_ref()
            .ok_or(AuthorizationError::Unauthenticated)?;

        if identity.banned {
            return Err(AuthorizationError::Banned {
                user_id: identity.id.clone(),
            });
        }

        Ok(identity)
    }

    /// Require an authenticated, non-banned identity holding `capability`
    pub fn authorize(&self, capability: Capability) -> Result<&Identity, AuthorizationError> {
        let identity = self.require_identity()?;

        if !self.capabilities().allows(capability) {
            return Err(AuthorizationError::Forbidden {
                user_id: identity.id.clone(),
                capability,
            });
        }

        Ok(identity)
    }

    /// Create a summary string for logging
    pub fn summary(&self) -> String {
        let user_info = match &self.identity {
            Some(identity) => format!("{}({})", identity.id, identity.role),
            None => "anonymous".to_string(),
        };

        format!(
            "RequestContext[user={}, capabilities={}]",
            user_info,
            self.capabilities().granted().len()
        )
    }
}
