//! Authenticator
//!
//! Best-effort bearer authentication. Every failure (missing header,
//! malformed header, rejected credential, unknown identity, store failure)
//! collapses into [`AuthOutcome::Anonymous`]; the cause is only logged.

use super::context::RequestContext;
use reviewdesk_core::{CredentialError, CredentialVerifier, Identity, IdentityStore, StoreError};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of authenticating one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Identity),
    Anonymous,
}

impl AuthOutcome {
    pub fn into_identity(self) -> Option<Identity> {
        match self {
            AuthOutcome::Authenticated(identity) => Some(identity),
            AuthOutcome::Anonymous => None,
        }
    }
}

/// Cause behind an anonymous outcome. Internal to this module; logged only.
#[derive(Debug)]
enum AnonymousReason {
    MissingHeader,
    MalformedHeader,
    CredentialRejected(CredentialError),
    IdentityNotFound(String),
    LookupFailed(String, StoreError),
}

impl fmt::Display for AnonymousReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnonymousReason::MissingHeader => write!(f, "no authorization header"),
            AnonymousReason::MalformedHeader => write!(f, "authorization header carries no token"),
            AnonymousReason::CredentialRejected(e) => write!(f, "credential rejected: {}", e),
            AnonymousReason::IdentityNotFound(id) => write!(f, "no identity for '{}'", id),
            AnonymousReason::LookupFailed(id, e) => write!(f, "lookup of '{}' failed: {}", id, e),
        }
    }
}

/// Token following the first whitespace run of an `Authorization` value.
///
/// The scheme keyword is not checked: `"Bearer abc"` and `"Token abc"` both
/// yield `"abc"`.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

/// Resolves the acting identity of a request from its bearer credential
#[derive(Clone)]
pub struct Authenticator {
    verifier: Arc<dyn CredentialVerifier>,
    store: Arc<dyn IdentityStore>,
}

impl Authenticator {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, store: Arc<dyn IdentityStore>) -> Self {
        Self { verifier, store }
    }

    /// Authenticate from the raw `Authorization` header value
    pub async fn authenticate(&self, authorization: Option<&str>) -> AuthOutcome {
        match self.resolve(authorization).await {
            Ok(identity) => {
                debug!(user = %identity.display_string(), "Request authenticated");
                AuthOutcome::Authenticated(identity)
            }
            Err(reason @ AnonymousReason::LookupFailed(..)) => {
                warn!(reason = %reason, "Treating request as anonymous");
                AuthOutcome::Anonymous
            }
            Err(AnonymousReason::MissingHeader) => AuthOutcome::Anonymous,
            Err(reason) => {
                debug!(reason = %reason, "Treating request as anonymous");
                AuthOutcome::Anonymous
            }
        }
    }

    /// Authenticate and store the outcome in `context`, replacing any
    /// identity it already held
    pub async fn authenticate_into(&self, context: &mut RequestContext, authorization: Option<&str>) {
        let outcome = self.authenticate(authorization).await;
        context.set_identity(outcome.into_identity());
    }

    async fn resolve(&self, authorization: Option<&str>) -> Result<Identity, AnonymousReason> {
        let header = authorization.ok_or(AnonymousReason::MissingHeader)?;
        let token = extract_bearer_token(header).ok_or(AnonymousReason::MalformedHeader)?;

        let user_id = self
            .verifier
            .verify(token)
            .await
            .map_err(AnonymousReason::CredentialRejected)?;

        match self.store.find_by_id(&user_id).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(AnonymousReason::IdentityNotFound(user_id)),
            Err(e) => Err(AnonymousReason::LookupFailed(user_id, e)),
        }
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}
