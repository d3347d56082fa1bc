//! Route definitions for the Reviewdesk web server

use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/me", get(handlers::me))
        .route("/auth/refresh", post(handlers::refresh_token))
        .route(
            "/roles/{role}/capabilities",
            get(handlers::role_capabilities),
        )
        // Back office
        .route("/admin/users", get(handlers::list_users))
        .route("/admin/users/{user_id}/ban", post(handlers::ban_user))
        .route("/admin/users/{user_id}/unban", post(handlers::unban_user))
}
