//! Ingestion pipeline: normalize, store, broadcast, acknowledge.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use hooksink_core::{EventId, InboundDelivery, WebhookEvent};
use hooksink_realtime::EventSink;

use crate::store::{StoreError, WebhookStore};

/// Acknowledgment returned to the caller after a completed ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub id: EventId,
    #[serde(rename = "timestamp")]
    pub received_at: DateTime<Utc>,
}

/// Ingestion failure.
///
/// Deliberately collapses into one generic failure at the HTTP boundary:
/// the caller cannot tell a transport read problem from a store problem.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("store rejected event: {0}")]
    Store(#[from] StoreError),
}

/// Single entry point turning one inbound delivery into one stored,
/// broadcast event and one acknowledgment.
///
/// Pipeline order is the contract: store write, then broadcast, then
/// acknowledgment. An observer reacting to the broadcast will already
/// find the event via the store's read path.
#[derive(Debug)]
pub struct IngestCoordinator<S, B> {
    store: S,
    sink: B,
}

impl<S, B> IngestCoordinator<S, B>
where
    S: WebhookStore,
    B: EventSink,
{
    pub fn new(store: S, sink: B) -> Self {
        Self { store, sink }
    }

    pub fn ingest(&self, delivery: InboundDelivery) -> Result<Receipt, IngestError> {
        // Identity and receive time are stamped here, after the transport
        // has read the body in full: `received_at` reflects acceptance,
        // not connection start. A body that fails JSON decode is kept raw.
        let event = WebhookEvent::from_delivery(delivery, Utc::now());
        let id = event.id();
        let received_at = event.received_at();

        self.store.put(event.clone())?;
        self.sink.publish(&event);

        tracing::info!(
            event_id = %id,
            source_addr = event.source_addr().unwrap_or("-"),
            "webhook ingested"
        );

        Ok(Receipt { id, received_at })
    }
}
