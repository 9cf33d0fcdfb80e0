use std::net::SocketAddr;
use std::sync::Arc;

use hooksink_api::app;
use hooksink_infra::RetentionConfig;

#[tokio::main]
async fn main() {
    hooksink_observability::init();

    let config = RetentionConfig::from_env();
    let services = Arc::new(app::services::build_services(config));
    let router = app::build_app(services.clone());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    // Connect-info lets ingestion record the caller's address.
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
    .unwrap();

    services.shutdown_sweeper();
    tracing::info!("shutdown complete");
}
