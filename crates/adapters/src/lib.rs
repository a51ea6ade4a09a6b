//! HTTP adapter for userkit
//!
//! Exposes a [`UserStorage`](userkit_model::UserStorage) backend over a small
//! REST API. The storage backend is injected when the server is built; the
//! handlers never know which backend they talk to.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http_server;
pub mod router;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use http_server::HttpServer;
pub use router::{build_router, AppState};
