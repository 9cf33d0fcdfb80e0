//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: infrastructure wiring (store, hub, coordinator, sweeper)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// All collaborators are constructed once in `build_services` and handed
/// down explicitly; handlers receive them through an `Extension` layer.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(ServiceBuilder::new().layer(Extension(services)))
}
