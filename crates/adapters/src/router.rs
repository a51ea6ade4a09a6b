//! Route table for the user API.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use userkit_model::UserStorage;

use crate::handlers;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Injected storage backend
    pub storage: Arc<dyn UserStorage>,
}

impl AppState {
    /// Wrap a storage backend for the router
    pub fn new(storage: Arc<dyn UserStorage>) -> Self {
        Self { storage }
    }
}

/// Build the router with every user endpoint nested under `api_root`.
///
/// `api_root` must already be validated (see [`crate::ServerConfig::validate`]).
pub fn build_router(state: AppState, api_root: &str) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/users", post(handlers::create_user))
        .route(
            "/users/:id",
            get(handlers::read_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .with_state(state);

    let app = if api_root.is_empty() {
        api
    } else {
        Router::new().nest(api_root, api)
    };

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
