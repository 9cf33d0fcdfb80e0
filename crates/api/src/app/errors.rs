use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

/// Opaque failure response: the caller sees a generic 500 with no
/// internal detail, whatever actually went wrong.
pub fn internal_error() -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
