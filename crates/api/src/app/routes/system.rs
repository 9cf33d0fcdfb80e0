use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::app::services::AppServices;

/// GET /healthz
///
/// Reports whether the real-time hub is reachable. Load balancers poll
/// this; keep it cheap.
pub async fn healthz(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    if services.hub().is_healthy() {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": Utc::now().to_rfc3339(),
                "checks": { "realtime_hub": "healthy" },
            })),
        )
            .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "unhealthy",
                "timestamp": Utc::now().to_rfc3339(),
                "checks": { "realtime_hub": "unhealthy" },
                "error": "realtime hub unavailable",
            })),
        )
            .into_response()
    }
}
