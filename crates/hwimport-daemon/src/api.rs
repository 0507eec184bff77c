//! REST API handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::state::AppState;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// API error response
#[derive(Serialize)]
struct ApiError {
    error: String,
}

impl ApiError {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

fn not_found(id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(format!("unknown discoverer id {}", id))),
    )
        .into_response()
}

/// List all discoverers in display order
pub async fn list_discoverers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!(count = state.discoverers().len(), "Listing discoverers");
    Json(state.discoverers().to_vec())
}

/// Get a specific discoverer by ID
pub async fn get_discoverer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.get_discoverer(&id) {
        Some(discoverer) => Json(discoverer.clone()).into_response(),
        None => not_found(&id),
    }
}

/// Check submitted ui field values against a discoverer's declared fields
pub async fn validate_fields(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let Some(discoverer) = state.get_discoverer(&id) else {
        return not_found(&id);
    };

    if !discoverer.ui_fields.is_empty() {
        let values: HashMap<String, String> = match serde_json::from_slice(&body) {
            Ok(values) => values,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiError::new(format!("error unmarshaling uiFields {}", e))),
                )
                    .into_response();
            }
        };

        if let Err(e) = discoverer.validate_fields(&values) {
            info!(discoverer = %id, error = %e, "Rejected ui fields");
            return (StatusCode::BAD_REQUEST, Json(ApiError::new(e.to_string()))).into_response();
        }
    }

    Json(serde_json::json!({
        "status": "valid",
        "discoverer_id": id
    }))
    .into_response()
}
