//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP surface is small: create and fetch registry bouquets, decode a
//! URL-embedded bouquet, build a self-contained link, and list the catalog.
//! Every failure a recipient or creator can trigger is answered with a
//! status code and an `{"error": "..."}` body; nothing escapes as a panic.

pub mod bouquets;
pub mod catalog;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/create", get(bouquets::get_record).post(bouquets::create_bouquet))
        .route("/api/bouquets/{id}", get(bouquets::get_bouquet))
        .route("/api/view", get(bouquets::view_payload))
        .route("/api/link", post(bouquets::create_link))
        .route("/api/flowers", get(catalog::list_flowers))
        .route("/api/catalog", get(catalog::full_catalog))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A status code with a user-facing message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong. Please try again.")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
