//! Request handlers
//!
//! Each handler pulls the injected storage out of [`AppState`] and performs
//! exactly one storage operation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use userkit_model::{NewUser, User};

use crate::error::ApiError;
use crate::router::AppState;

/// Body returned by the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = new_user.into_user();
    state.storage.create(user.clone()).await?;

    info!("Created user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/:id`
pub async fn read_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.storage.read(&user_id).await?;
    Ok(Json(user))
}

/// `PUT /users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(new_user): Json<NewUser>,
) -> Result<Json<User>, ApiError> {
    if let Some(body_id) = &new_user.id {
        if *body_id != user_id {
            return Err(ApiError::BadRequest {
                reason: format!("Body id '{}' does not match path id '{}'", body_id, user_id),
            });
        }
    }

    let user = state.storage.update(new_user.with_id(user_id)).await?;

    info!("Updated user {}", user.id);
    Ok(Json(user))
}

/// `DELETE /users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.storage.delete(&user_id).await?;

    info!("Deleted user {}", user.id);
    Ok(Json(user))
}
