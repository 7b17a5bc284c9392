use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::errors;
use crate::app::services::AppServices;

pub const LIVENESS_TEXT: &str = "Action Figure Fanatics server is running";

pub async fn root() -> &'static str {
    LIVENESS_TEXT
}

/// Health probe: 200 when the listing store answers a ping.
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.listings().ping().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            errors::json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", e.to_string())
        }
    }
}
