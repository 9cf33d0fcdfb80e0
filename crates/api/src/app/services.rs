use std::sync::{Arc, Mutex};

use hooksink_core::{InboundDelivery, WebhookEvent};
use hooksink_infra::{
    IngestCoordinator, IngestError, InMemoryWebhookStore, Receipt, RetentionConfig,
    RetentionSweeper, StoreError, SweeperHandle, WebhookStore,
};
use hooksink_realtime::WebhookHub;

/// Shared service graph, constructed once at startup.
///
/// The sweeper handle is kept here so process shutdown can stop the
/// background loop explicitly.
pub struct AppServices {
    store: Arc<InMemoryWebhookStore>,
    hub: Arc<WebhookHub>,
    coordinator: IngestCoordinator<Arc<InMemoryWebhookStore>, Arc<WebhookHub>>,
    config: RetentionConfig,
    sweeper: Mutex<Option<SweeperHandle>>,
}

/// Construct store, hub, coordinator and sweeper, wiring them together
/// explicitly (no global registry).
pub fn build_services(config: RetentionConfig) -> AppServices {
    let store = Arc::new(InMemoryWebhookStore::new());
    let hub = Arc::new(WebhookHub::new());

    let coordinator = IngestCoordinator::new(store.clone(), hub.clone());
    let sweeper = RetentionSweeper::new(store.clone(), config.clone()).spawn();

    AppServices {
        store,
        hub,
        coordinator,
        config,
        sweeper: Mutex::new(Some(sweeper)),
    }
}

impl AppServices {
    /// Run the full ingestion pipeline for one delivery.
    pub fn ingest(&self, delivery: InboundDelivery) -> Result<Receipt, IngestError> {
        self.coordinator.ingest(delivery)
    }

    /// Currently-live events, most recent first.
    pub fn recent(&self) -> Result<Vec<Arc<WebhookEvent>>, StoreError> {
        self.store.recent(self.config.retention, chrono::Utc::now())
    }

    pub fn hub(&self) -> &Arc<WebhookHub> {
        &self.hub
    }

    /// Stop the background sweeper. Idempotent; later calls are no-ops.
    pub fn shutdown_sweeper(&self) {
        let handle = self.sweeper.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            handle.shutdown();
        }
    }
}
