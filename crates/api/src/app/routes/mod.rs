use axum::{routing::get, Router};

pub mod hub;
pub mod system;
pub mod webhooks;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(system::healthz))
        .route("/webhookhub", get(hub::upgrade))
        .merge(webhooks::router())
}
