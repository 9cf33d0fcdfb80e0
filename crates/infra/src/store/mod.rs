//! Transient webhook storage.
//!
//! The store owns retention: an event stays queryable until a sweep (or a
//! direct eviction call) removes it.

mod in_memory;

pub use in_memory::InMemoryWebhookStore;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use hooksink_core::WebhookEvent;

/// Storage error. The in-memory store can only fail by lock poisoning.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
}

/// Concurrency-safe, time-bounded collection of received events.
///
/// Locks taken by implementations cover in-memory bookkeeping only; no
/// blocking I/O happens inside a critical section.
pub trait WebhookStore: Send + Sync {
    /// Insert or replace by id. The event is visible to `recent` as soon
    /// as this returns.
    fn put(&self, event: WebhookEvent) -> Result<(), StoreError>;

    /// Events with `received_at >= now - retention`, most recent first;
    /// ties broken most-recently-inserted first. The result is a
    /// consistent snapshot.
    fn recent(
        &self,
        retention: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<Arc<WebhookEvent>>, StoreError>;

    /// Remove every event older than the retention window; returns the
    /// number removed. Idempotent.
    fn evict_expired(&self, retention: Duration, now: DateTime<Utc>) -> Result<usize, StoreError>;
}

impl<S> WebhookStore for Arc<S>
where
    S: WebhookStore + ?Sized,
{
    fn put(&self, event: WebhookEvent) -> Result<(), StoreError> {
        (**self).put(event)
    }

    fn recent(
        &self,
        retention: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<Arc<WebhookEvent>>, StoreError> {
        (**self).recent(retention, now)
    }

    fn evict_expired(&self, retention: Duration, now: DateTime<Utc>) -> Result<usize, StoreError> {
        (**self).evict_expired(retention, now)
    }
}
