//! HTTP server.
//!
//! Owns the configuration and the injected storage backend, and serves the
//! router from [`crate::router`] until told to stop.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use userkit_model::UserStorage;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::router::{build_router, AppState};

/// HTTP server for the user API.
pub struct HttpServer {
    config: ServerConfig,
    storage: Arc<dyn UserStorage>,
}

impl HttpServer {
    /// Creates a new [`HttpServer`] serving the given storage backend.
    pub fn new(config: ServerConfig, storage: Arc<dyn UserStorage>) -> Self {
        Self { config, storage }
    }

    /// Access the configuration associated with this server.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router without binding a socket (useful for testing).
    pub fn router(&self) -> Result<axum::Router, ServerError> {
        self.config.validate()?;
        let state = AppState::new(Arc::clone(&self.storage));
        Ok(build_router(state, &self.config.api_root))
    }

    /// Serve requests until the process is stopped.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(std::future::pending()).await
    }

    /// Serve requests until `shutdown` resolves, then drain in-flight
    /// requests and return.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        info!(
            "HTTP server listening on {}{}",
            listener.local_addr()?,
            self.config.api_root
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
