mod logs;
mod scrape;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use pricewatch_scraper::{ErrorKind, ProductChecker, ScraperError};
use pricewatch_store::LogStore;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<ProductChecker>,
    pub log_store: Arc<LogStore>,
    /// Substring every accepted listing URL must contain.
    pub allowed_domain: Arc<str>,
    /// Successful checks are logged at most once per window.
    pub log_window: chrono::Duration,
}

/// Error body returned by every endpoint: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Removed listings are a missing resource; every other check failure
    /// is a processing failure.
    pub fn from_scraper(error: &ScraperError) -> Self {
        let status = match error.kind() {
            ErrorKind::ProductNotFound => StatusCode::NOT_FOUND,
            ErrorKind::ParseError | ErrorKind::NetworkError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/scrape", post(scrape::scrape))
        .route("/api/logs", get(logs::list_logs))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
