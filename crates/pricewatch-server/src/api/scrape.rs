use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use pricewatch_core::{validate_listing_url, CoreError, ProductRecord, Report};
use pricewatch_store::LogEntry;

use crate::middleware::{client_ip, RequestId};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ScrapeResponse {
    success: bool,
    data: ProductRecord,
    report: Report,
}

/// `POST /api/scrape`: checks one listing and logs the outcome.
pub(super) async fn scrape(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let ip = client_ip(&headers);

    let requested = match &body {
        Ok(Json(request)) => request.url.as_deref(),
        Err(rejection) => {
            tracing::debug!(request_id = %req_id.0, error = %rejection, "unreadable scrape body");
            None
        }
    };

    let url = match validate_listing_url(requested, &state.allowed_domain) {
        Ok(url) => url.to_owned(),
        Err(e) => {
            let logged_url = match &e {
                CoreError::MissingUrl => "invalid".to_string(),
                CoreError::ForeignDomain { url, .. } => url.clone(),
            };
            record(&state, LogEntry::failure(logged_url, e.to_string(), Some(ip))).await;
            return Err(ApiError::bad_request(e.to_string()));
        }
    };

    match state.checker.check(&url).await {
        Ok(product) => {
            let entry = LogEntry::success(product.clone(), Some(ip));
            if let Err(e) = state
                .log_store
                .append_success_if_due(entry, state.log_window)
                .await
            {
                tracing::warn!(request_id = %req_id.0, error = %e, "failed to write success log");
            }

            tracing::info!(
                request_id = %req_id.0,
                url = %url,
                price = product.price,
                available = product.available,
                "listing checked"
            );

            let report = Report::from_record(&product, Utc::now());
            Ok(Json(ScrapeResponse {
                success: true,
                data: product,
                report,
            }))
        }
        Err(e) => {
            tracing::warn!(
                request_id = %req_id.0,
                url = %url,
                kind = ?e.kind(),
                code = e.code(),
                error = %e,
                "listing check failed"
            );
            record(&state, LogEntry::failure(url, e.to_string(), Some(ip))).await;
            Err(ApiError::from_scraper(&e))
        }
    }
}

/// Appends to the log store; a store failure never changes the response.
async fn record(state: &AppState, entry: LogEntry) {
    if let Err(e) = state.log_store.append(entry).await {
        tracing::warn!(error = %e, "failed to write check log");
    }
}
