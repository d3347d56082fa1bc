//! Reviewdesk Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebError, WebResult};
use axum::serve;
use reviewdesk_core::ReviewdeskConfig;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main Reviewdesk web server
pub struct ReviewdeskServer {
    state: AppState,
}

impl ReviewdeskServer {
    /// Create a new server
    pub fn new(config: ReviewdeskConfig) -> WebResult<Self> {
        config.validate()?;
        Ok(Self {
            state: AppState::new(config),
        })
    }

    /// Start the web server and run until Ctrl-C
    pub async fn start(self) -> WebResult<()> {
        let address = self.state.config.server.address();
        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        info!("Server shut down gracefully");
        Ok(())
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Builder for ReviewdeskServer
pub struct ReviewdeskServerBuilder {
    config: ReviewdeskConfig,
}

impl ReviewdeskServerBuilder {
    /// Start from an already-loaded configuration
    pub fn new(config: ReviewdeskConfig) -> Self {
        Self { config }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<ReviewdeskServer> {
        ReviewdeskServer::new(self.config)
    }
}

impl Default for ReviewdeskServerBuilder {
    fn default() -> Self {
        Self::new(ReviewdeskConfig::default())
    }
}
