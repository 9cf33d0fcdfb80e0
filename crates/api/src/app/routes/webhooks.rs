use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Extension},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use hooksink_core::InboundDelivery;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/webhook/recent", get(recent_webhooks))
}

/// POST /webhook
///
/// Accepts any body and content type. The body is read in full before the
/// event is stamped and stored, so the acknowledged timestamp reflects
/// acceptance of the whole payload.
pub async fn receive_webhook(
    Extension(services): Extension<Arc<AppServices>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let delivery = InboundDelivery {
        source_addr: connect_info.map(|ConnectInfo(addr)| addr.ip().to_string()),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        headers: dto::headers_to_map(&headers),
        body: body.to_vec(),
    };

    match services.ingest(delivery) {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to ingest webhook");
            errors::internal_error()
        }
    }
}

/// GET /webhook/recent
///
/// Ordered list of currently-live events, most recent first.
pub async fn recent_webhooks(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.recent() {
        Ok(events) => {
            let events: Vec<_> = events.iter().map(|event| event.as_ref()).collect();
            (StatusCode::OK, Json(events)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to read recent webhooks");
            errors::internal_error()
        }
    }
}
