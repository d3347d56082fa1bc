//! HTTP request handlers

use crate::{
    auth::{
        guards::{AdministrativeControls, BanUsers, UserListing},
        AuthenticatedUser, CurrentIdentity, RequireCapability,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use reviewdesk_access::{resolve_capabilities, resolve_for, Capability, CapabilitySet};
use reviewdesk_core::{Identity, Role};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

/// Handler errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        (
            status,
            Json(json!({
                "error": code,
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: String,
}

/// Health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The caller's identity and what it may do
#[derive(Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub identity: Option<Identity>,
    pub capabilities: CapabilitySet,
    pub granted: Vec<Capability>,
}

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<MeResponse> {
    let capabilities = resolve_for(identity.as_ref());

    Json(MeResponse {
        authenticated: identity.is_some(),
        identity,
        capabilities,
        granted: capabilities.granted(),
    })
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Issue a fresh access token for the caller
pub async fn refresh_token(
    AuthenticatedUser(identity): AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, ApiError> {
    let access_token = state.jwt.issue_access_token(&identity.id).map_err(|e| {
        error!(user_id = %identity.id, "Token refresh failed: {}", e);
        ApiError::Internal("token issuance failed".to_string())
    })?;

    info!(user_id = %identity.id, "Access token refreshed");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.auth.access_token_ttl_secs,
    }))
}

#[derive(Serialize)]
pub struct RoleCapabilitiesResponse {
    pub role: String,
    pub capabilities: CapabilitySet,
    pub granted: Vec<Capability>,
}

/// Capability set of a named role
pub async fn role_capabilities(
    _guard: RequireCapability<AdministrativeControls>,
    Path(role): Path<String>,
) -> Result<Json<RoleCapabilitiesResponse>, ApiError> {
    let role: Role = role
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Role '{}'", role)))?;
    let capabilities = resolve_capabilities(role);

    Ok(Json(RoleCapabilitiesResponse {
        role: role.to_string(),
        capabilities,
        granted: capabilities.granted(),
    }))
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<Identity>,
    pub total: usize,
}

pub async fn list_users(
    _guard: RequireCapability<UserListing>,
    State(state): State<AppState>,
) -> Json<UsersResponse> {
    let users = state.users.list().await;

    Json(UsersResponse {
        total: users.len(),
        users,
    })
}

pub async fn ban_user(
    guard: RequireCapability<BanUsers>,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Identity>, ApiError> {
    set_banned(guard.identity(), &state, &user_id, true).await
}

pub async fn unban_user(
    guard: RequireCapability<BanUsers>,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Identity>, ApiError> {
    set_banned(guard.identity(), &state, &user_id, false).await
}

async fn set_banned(
    actor: &Identity,
    state: &AppState,
    user_id: &str,
    banned: bool,
) -> Result<Json<Identity>, ApiError> {
    let updated = state
        .users
        .set_banned(user_id, banned)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("User '{}'", user_id)))?;

    info!(actor = %actor.id, user_id, banned, "Ban status changed");
    Ok(Json(updated))
}
