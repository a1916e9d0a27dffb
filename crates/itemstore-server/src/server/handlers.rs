//! HTTP handlers for the item CRUD API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use itemstore_core::{Item, ItemRepository};

/// App state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
}

/// API error taxonomy. Repository failures are logged server-side and
/// surface as an opaque 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(e) => {
                error!("[Server] Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Root greeting endpoint
pub async fn greet() -> Json<serde_json::Value> {
    Json(json!({ "Hello": "itemstore" }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    debug!("[Server] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Request payload for creating or updating an item
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: Option<String>,
}

/// Create a new item
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemPayload>,
) -> Result<Json<Item>, ApiError> {
    let mut item = Item::new(payload.name);
    item.description = payload.description;

    state.items.create(&item).await?;
    debug!("[Server] Created item {}", item.id);

    Ok(Json(item))
}

/// List all items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.items.list().await?;
    Ok(Json(items))
}

/// Fetch a single item
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Item>, ApiError> {
    let item = state.items.get(&id).await?.ok_or(ApiError::NotFound(id))?;
    Ok(Json(item))
}

/// Update an item's name and description
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItemPayload>,
) -> Result<Json<Item>, ApiError> {
    let mut item = state.items.get(&id).await?.ok_or(ApiError::NotFound(id))?;
    item.apply_update(payload.name, payload.description);

    state.items.update(&item).await?;
    debug!("[Server] Updated item {}", item.id);

    Ok(Json(item))
}

/// Delete an item
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.items.delete(&id).await? {
        return Err(ApiError::NotFound(id));
    }
    debug!("[Server] Deleted item {}", id);

    Ok(Json(json!({ "deleted": true })))
}
