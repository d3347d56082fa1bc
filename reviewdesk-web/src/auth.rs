//! Authentication and authorization extractors
//!
//! The [`authenticate`](crate::middleware::authenticate) middleware leaves a
//! [`RequestContext`] in the request extensions. The extractors here read it
//! and apply route-level policy: anonymous access, authenticated access, or a
//! specific capability.

pub mod jwt;
pub mod users;

#[cfg(test)]
mod tests;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};
use reviewdesk_access::{AuthorizationError, Capability, RequestContext};
use reviewdesk_core::Identity;
use serde_json::json;
use std::marker::PhantomData;
use tracing::{error, warn};

/// Rejection produced by the auth extractors
#[derive(Debug)]
pub enum AuthRejection {
    /// The authentication middleware did not run for this route
    MissingContext,
    Denied(AuthorizationError),
}

impl From<AuthorizationError> for AuthRejection {
    fn from(err: AuthorizationError) -> Self {
        AuthRejection::Denied(err)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthRejection::MissingContext => {
                error!("RequestContext not found - authentication middleware not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "Authentication is not configured for this route",
                    }),
                )
            }
            AuthRejection::Denied(err) => {
                let message = err.to_string();
                match err {
                    AuthorizationError::Unauthenticated => (
                        StatusCode::UNAUTHORIZED,
                        json!({
                            "error": "unauthenticated",
                            "message": message,
                        }),
                    ),
                    AuthorizationError::Banned { user_id } => (
                        StatusCode::FORBIDDEN,
                        json!({
                            "error": "account_banned",
                            "message": message,
                            "user_id": user_id,
                        }),
                    ),
                    AuthorizationError::Forbidden {
                        user_id,
                        capability,
                    } => (
                        StatusCode::FORBIDDEN,
                        json!({
                            "error": "permission_denied",
                            "message": message,
                            "required_capability": capability,
                            "user_id": user_id,
                        }),
                    ),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// The request's [`RequestContext`]
#[derive(Debug, Clone)]
pub struct AuthContext(pub RequestContext);

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthContext)
            .ok_or(AuthRejection::MissingContext)
    }
}

/// Optional identity - never rejects an anonymous request
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthContext(context) = AuthContext::from_request_parts(parts, state).await?;
        Ok(CurrentIdentity(context.into_identity()))
    }
}

/// Authenticated, non-banned identity
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthContext(context) = AuthContext::from_request_parts(parts, state).await?;

        context.require_identity().cloned().map(AuthenticatedUser).map_err(|err| {
            warn!("Authenticated identity required: {}", err);
            AuthRejection::Denied(err)
        })
    }
}

/// Marker naming the capability a [`RequireCapability`] extractor checks
pub trait CapabilityGuard: Send + Sync + 'static {
    const CAPABILITY: Capability;
}

/// Authenticated, non-banned identity holding `G::CAPABILITY`
#[derive(Debug, Clone)]
pub struct RequireCapability<G: CapabilityGuard>(pub Identity, PhantomData<G>);

impl<G: CapabilityGuard> RequireCapability<G> {
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    pub fn into_identity(self) -> Identity {
        self.0
    }
}

impl<S, G> FromRequestParts<S> for RequireCapability<G>
where
    S: Send + Sync,
    G: CapabilityGuard,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthContext(context) = AuthContext::from_request_parts(parts, state).await?;

        match context.authorize(G::CAPABILITY) {
            Ok(identity) => Ok(RequireCapability(identity.clone(), PhantomData)),
            Err(err) => {
                warn!(capability = %G::CAPABILITY, "Authorization failed: {}", err);
                Err(AuthRejection::Denied(err))
            }
        }
    }
}

macro_rules! capability_guards {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl CapabilityGuard for $name {
                const CAPABILITY: Capability = Capability::$name;
            }
        )*
    };
}

/// Guard markers, one per capability
pub mod guards {
    use super::{Capability, CapabilityGuard};

    capability_guards!(
        AdministrativeControls,
        CrossCompanyEdit,
        UserListing,
        BanUsers,
        CompanyRemoval,
        ReportHandling,
        PageEditing,
        SubscriptionCancellation,
        CompanyConversion,
    );
}
