//! REST endpoint for onboarding submissions.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::model::{OnboardingRequest, OnboardingResponse};
use super::service::OnboardingService;
use crate::error::OnboardingError;

/// Path the form collector posts to.
pub const ONBOARDING_PATH: &str = "/api/onboarding";

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub service: Arc<OnboardingService>,
}

/// POST /api/onboarding
///
/// A body that fails to decode is answered exactly like a storage failure.
async fn submit(
    State(state): State<OnboardingRouteState>,
    payload: Result<Json<OnboardingRequest>, JsonRejection>,
) -> Result<Json<OnboardingResponse>, OnboardingError> {
    let Json(request) =
        payload.map_err(|rejection| OnboardingError::InvalidPayload(rejection.body_text()))?;

    let user_id = state.service.submit(&request).await?;

    Ok(Json(OnboardingResponse {
        success: true,
        user_id,
    }))
}

/// Any other method on the onboarding path.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Only POST requests allowed" })),
    )
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route(ONBOARDING_PATH, post(submit).fallback(method_not_allowed))
        .with_state(state)
}
