//! Collaborator traits consumed by the access layer

use crate::error::{CredentialError, StoreError};
use crate::types::Identity;
use async_trait::async_trait;

/// Verifies bearer credentials.
///
/// Implementations must fail (never panic) for malformed, expired or badly
/// signed tokens.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify a raw token and return the identifier it encodes
    async fn verify(&self, token: &str) -> Result<String, CredentialError>;
}

/// Looks up persisted identities
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Fetch an identity by identifier. `Ok(None)` when no record exists.
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError>;
}
