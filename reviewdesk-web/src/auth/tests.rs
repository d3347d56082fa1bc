//! Tests for the auth extractors

use super::guards::{BanUsers, ReportHandling};
use super::*;
use axum::{
    body::Body,
    http::{Method, Request},
};
use reviewdesk_core::Role;

fn parts_with_context(context: Option<RequestContext>) -> Parts {
    let mut request = Request::builder()
        .method(Method::GET)
        .uri("/test")
        .body(Body::empty())
        .unwrap();

    if let Some(context) = context {
        request.extensions_mut().insert(context);
    }

    request.into_parts().0
}

fn context_for(identity: Identity) -> Option<RequestContext> {
    Some(RequestContext::with_identity(identity))
}

#[tokio::test]
async fn test_current_identity_anonymous() {
    let mut parts = parts_with_context(Some(RequestContext::new()));

    let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(&mut parts, &())
        .await
        .unwrap();

    assert!(identity.is_none());
}

#[tokio::test]
async fn test_current_identity_present() {
    let identity = Identity::new("u1", Role::Support);
    let mut parts = parts_with_context(context_for(identity.clone()));

    let CurrentIdentity(found) = CurrentIdentity::from_request_parts(&mut parts, &())
        .await
        .unwrap();

    assert_eq!(found, Some(identity));
}

#[tokio::test]
async fn test_missing_context_is_server_error() {
    let mut parts = parts_with_context(None);

    let rejection = CurrentIdentity::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert!(matches!(rejection, AuthRejection::MissingContext));
    assert_eq!(
        rejection.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_authenticated_user_rejects_anonymous() {
    let mut parts = parts_with_context(Some(RequestContext::new()));

    let rejection = AuthenticatedUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticated_user_rejects_banned() {
    let banned = Identity::new("u1", Role::Standard).banned(true);
    let mut parts = parts_with_context(context_for(banned));

    let rejection = AuthenticatedUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert_eq!(rejection.into_response().status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_require_capability_allows_manager() {
    let manager = Identity::new("u1", Role::Manager);
    let mut parts = parts_with_context(context_for(manager.clone()));

    let guard = RequireCapability::<BanUsers>::from_request_parts(&mut parts, &())
        .await
        .unwrap();

    assert_eq!(guard.identity(), &manager);
}

#[tokio::test]
async fn test_require_capability_support_subset() {
    let support = Identity::new("u2", Role::Support);

    let mut parts = parts_with_context(context_for(support.clone()));
    assert!(
        RequireCapability::<ReportHandling>::from_request_parts(&mut parts, &())
            .await
            .is_ok()
    );

    let mut parts = parts_with_context(context_for(support));
    let rejection = RequireCapability::<BanUsers>::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    match rejection {
        AuthRejection::Denied(AuthorizationError::Forbidden {
            user_id,
            capability,
        }) => {
            assert_eq!(user_id, "u2");
            assert_eq!(capability, Capability::BanUsers);
        }
        other => panic!("unexpected rejection: {:?}", other),
    }
}

#[tokio::test]
async fn test_require_capability_rejects_anonymous() {
    let mut parts = parts_with_context(Some(RequestContext::new()));

    let rejection = RequireCapability::<ReportHandling>::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_guard_markers_map_to_capabilities() {
    assert_eq!(
        <guards::AdministrativeControls as CapabilityGuard>::CAPABILITY,
        Capability::AdministrativeControls
    );
    assert_eq!(
        <guards::CompanyConversion as CapabilityGuard>::CAPABILITY,
        Capability::CompanyConversion
    );
}
