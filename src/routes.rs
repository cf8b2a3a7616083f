//! REST endpoints for the onboarding wizard, plan, and local search.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::app::AppController;
use crate::error::Error;
use crate::profile::ProfileDraft;

/// Shared state for the application routes.
#[derive(Clone)]
pub struct AppRouteState {
    pub controller: Arc<AppController>,
}

/// Body for POST /api/local/search.
#[derive(Debug, Deserialize)]
struct LocalSearchRequest {
    query: String,
}

/// GET /api/status
///
/// Returns the current application state, the wizard position during
/// onboarding, and the profile/plan once available.
async fn get_status(State(state): State<AppRouteState>) -> impl IntoResponse {
    Json(state.controller.status().await)
}

/// POST /api/onboarding/fields
///
/// Overlays a partial field update onto the wizard draft.
async fn update_fields(
    State(state): State<AppRouteState>,
    Json(patch): Json<ProfileDraft>,
) -> Response {
    match state.controller.update_draft(patch).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/next
///
/// Advances the wizard; from the final step this submits the profile and
/// blocks until generation completes one way or the other.
async fn next_step(State(state): State<AppRouteState>) -> Response {
    match state.controller.wizard_next().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/back
async fn back_step(State(state): State<AppRouteState>) -> Response {
    match state.controller.wizard_back().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/plan
///
/// Returns the generated plan, or 404 before one exists.
async fn get_plan(State(state): State<AppRouteState>) -> Response {
    match state.controller.plan().await {
        Some(plan) => Json(plan).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "No plan has been generated yet"})),
        )
            .into_response(),
    }
}

/// POST /api/local/search
///
/// Best-effort local resource lookup near the profile's location. The
/// gateway never fails; a 409 means no profile has been submitted yet.
async fn local_search(
    State(state): State<AppRouteState>,
    Json(request): Json<LocalSearchRequest>,
) -> Response {
    match state.controller.local_search(&request.query).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/reset
async fn reset(State(state): State<AppRouteState>) -> Response {
    match state.controller.reset().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// Map service errors onto HTTP responses. Validation failures are
/// unprocessable input, wrong-state requests are conflicts, everything else
/// is internal.
fn error_response(error: Error) -> Response {
    let status = match &error {
        Error::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Controller(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({"error": error.to_string()})),
    )
        .into_response()
}

/// Build the application routes.
pub fn app_routes(controller: Arc<AppController>) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/onboarding/fields", post(update_fields))
        .route("/api/onboarding/next", post(next_step))
        .route("/api/onboarding/back", post(back_step))
        .route("/api/plan", get(get_plan))
        .route("/api/local/search", post(local_search))
        .route("/api/reset", post(reset))
        .layer(CorsLayer::permissive())
        .with_state(AppRouteState { controller })
}
