//! Shared application state

use crate::auth::{jwt::JwtService, users::MemoryIdentityStore};
use reviewdesk_access::Authenticator;
use reviewdesk_core::ReviewdeskConfig;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<ReviewdeskConfig>,
    /// Resolves the identity of each request
    pub authenticator: Authenticator,
    /// Identity records, shared with the authenticator
    pub users: MemoryIdentityStore,
    /// Access token issuer/verifier, shared with the authenticator
    pub jwt: Arc<JwtService>,
}

impl AppState {
    /// Create application state from configuration
    pub fn new(config: ReviewdeskConfig) -> Self {
        if config.auth.uses_default_secret() {
            warn!("Using the built-in development JWT secret; set REVIEWDESK_AUTH__JWT_SECRET");
        }

        let jwt = Arc::new(JwtService::new(&config.auth));
        let users = MemoryIdentityStore::from_identities(config.users.clone());
        let authenticator = Authenticator::new(jwt.clone(), Arc::new(users.clone()));

        info!(seeded_users = config.users.len(), "Application state initialized");

        Self {
            config: Arc::new(config),
            authenticator,
            users,
            jwt,
        }
    }
}
