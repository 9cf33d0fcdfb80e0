//! Publishing seam between ingestion and the fan-out hub.

use std::sync::Arc;

use hooksink_core::WebhookEvent;

/// Best-effort, fire-and-forget event publication.
///
/// Implementations must never block the caller on a slow observer and
/// never surface per-observer delivery failures; an undeliverable send is
/// dropped, not retried.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &WebhookEvent);
}

impl<B> EventSink for Arc<B>
where
    B: EventSink + ?Sized,
{
    fn publish(&self, event: &WebhookEvent) {
        (**self).publish(event)
    }
}
