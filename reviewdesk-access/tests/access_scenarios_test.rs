//! End-to-end scenarios for the authenticator and permission resolver,
//! driven only through the public API.

use async_trait::async_trait;
use reviewdesk_access::{
    resolve_capabilities, AuthOutcome, Authenticator, Capability, CapabilitySet, RequestContext,
};
use reviewdesk_core::{CredentialError, CredentialVerifier, Identity, IdentityStore, Role, StoreError};
use std::collections::HashMap;
use std::sync::Arc;

struct StaticVerifier {
    accepted: Option<(&'static str, &'static str)>,
}

#[async_trait]
impl CredentialVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<String, CredentialError> {
        match self.accepted {
            Some((t, id)) if t == token => Ok(id.to_string()),
            _ => Err(CredentialError::Expired),
        }
    }
}

struct MapStore(HashMap<String, Identity>);

#[async_trait]
impl IdentityStore for MapStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.0.get(id).cloned())
    }
}

fn build(accepted: Option<(&'static str, &'static str)>, identities: Vec<Identity>) -> Authenticator {
    let store = MapStore(identities.into_iter().map(|i| (i.id.clone(), i)).collect());
    Authenticator::new(Arc::new(StaticVerifier { accepted }), Arc::new(store))
}

#[tokio::test]
async fn scenario_header_absent() {
    let auth = build(Some(("abc123", "u1")), vec![Identity::new("u1", Role::Manager)]);
    assert_eq!(auth.authenticate(None).await, AuthOutcome::Anonymous);
}

#[tokio::test]
async fn scenario_verifier_fails() {
    let auth = build(None, vec![Identity::new("u1", Role::Manager)]);
    assert_eq!(
        auth.authenticate(Some("Bearer abc123")).await,
        AuthOutcome::Anonymous
    );
}

#[tokio::test]
async fn scenario_manager_resolves_everything() {
    let manager = Identity::new("u1", Role::Manager);
    let auth = build(Some(("abc123", "u1")), vec![manager.clone()]);

    let mut context = RequestContext::new();
    auth.authenticate_into(&mut context, Some("Bearer abc123")).await;

    assert_eq!(context.identity(), Some(&manager));
    assert_eq!(resolve_capabilities(Role::Manager), CapabilitySet::ALL);
    assert_eq!(context.capabilities(), CapabilitySet::ALL);
}

#[tokio::test]
async fn scenario_support_resolves_subset() {
    let support = Identity::new("u1", Role::Support);
    let auth = build(Some(("abc123", "u1")), vec![support.clone()]);

    let mut context = RequestContext::new();
    auth.authenticate_into(&mut context, Some("Bearer abc123")).await;

    assert_eq!(context.identity(), Some(&support));
    assert_eq!(
        context.capabilities().granted(),
        vec![
            Capability::AdministrativeControls,
            Capability::ReportHandling,
            Capability::SubscriptionCancellation,
        ]
    );
}

#[tokio::test]
async fn scenario_identity_not_found() {
    let auth = build(Some(("abc123", "u2")), vec![Identity::new("u1", Role::Manager)]);

    let mut context = RequestContext::new();
    auth.authenticate_into(&mut context, Some("Bearer abc123")).await;
    assert!(context.is_anonymous());
}

#[test]
fn scenario_unset_role_has_no_capabilities() {
    let caps = resolve_capabilities(Role::default());
    for capability in Capability::ALL {
        assert!(!caps.allows(capability));
    }
}
