//! REST endpoints for gate status and support resets.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::gate::CompletionGate;

/// Shared state for flow routes.
#[derive(Clone)]
pub struct FlowRouteState {
    pub onboarding: Arc<CompletionGate>,
    pub user_info: Arc<CompletionGate>,
}

impl FlowRouteState {
    fn gate(&self, name: &str) -> Option<&Arc<CompletionGate>> {
        match name {
            "onboarding" => Some(&self.onboarding),
            "user_info" => Some(&self.user_info),
            _ => None,
        }
    }
}

/// GET /api/flows/{flow}/status
///
/// Reports whether the flow completed. `completed` is null until the
/// gate's first read resolves.
async fn get_status(
    State(state): State<FlowRouteState>,
    Path(flow): Path<String>,
) -> impl IntoResponse {
    match state.gate(&flow) {
        Some(gate) => Json(serde_json::json!({
            "flow": flow,
            "completed": gate.is_complete().await,
            "loading": gate.is_loading().await,
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Unknown flow"})),
        )
            .into_response(),
    }
}

/// POST /api/flows/{flow}/reset
///
/// Clears the flow's persisted flag and data. Support/testing tool.
async fn reset_flow(
    State(state): State<FlowRouteState>,
    Path(flow): Path<String>,
) -> impl IntoResponse {
    let Some(gate) = state.gate(&flow) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Unknown flow"})),
        )
            .into_response();
    };
    match gate.reset().await {
        Ok(()) => Json(serde_json::json!({"flow": flow, "reset": true})).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// Build the flow status routes.
pub fn flow_routes(state: FlowRouteState) -> Router {
    Router::new()
        .route("/api/flows/{flow}/status", get(get_status))
        .route("/api/flows/{flow}/reset", post(reset_flow))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
