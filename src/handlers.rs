use crate::errors::AppError;
use crate::models::{SubmitEmailRequest, SubmitEmailResponse};
use crate::services::SubmissionService;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Largest accepted request body. One email address fits many times over.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead capture pipeline.
    pub submissions: SubmissionService,
    /// Header that carries the caller's origin address (lowercase).
    pub forwarded_for_header: String,
    /// Answer failures with HTTP 200 and the status in the body.
    pub legacy_error_status: bool,
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/submit-email
///
/// Validates the address, stores a lead and sends the recruitment letter.
/// Every failure, including an unreadable body, is answered with the same
/// `{ "error", "status" }` shape.
pub async fn submit_email(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SubmitEmailRequest>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(request)) => {
            let ip_address = forwarded_ip(&headers, &state.forwarded_for_header);
            state
                .submissions
                .submit(&request.email, ip_address)
                .await
                .map(|_| ())
        }
        Err(rejection) => Err(AppError::Validation(format!(
            "Unreadable request body: {}",
            rejection.body_text()
        ))),
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(SubmitEmailResponse::ok())).into_response(),
        Err(e) => e.into_response_with_mode(state.legacy_error_status),
    }
}

/// Best-effort origin address: the first entry of the forwarding header.
pub fn forwarded_ip(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Builds the HTTP application around `state`.
///
/// Oversized bodies are cut off by the extractor, so they reach
/// `submit_email` as a `JsonRejection` and get the uniform failure body.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/submit-email", post(submit_email))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .route("/health", get(health))
        .merge(api_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
