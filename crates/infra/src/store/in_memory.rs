use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use hooksink_core::{EventId, WebhookEvent};

use super::{StoreError, WebhookStore};

#[derive(Debug, Clone)]
struct StoredEntry {
    /// Tie-breaker for events sharing a `received_at` instant.
    seq: u64,
    event: Arc<WebhookEvent>,
}

/// In-memory store keyed by event id.
///
/// Safe for concurrent `put`/`recent`/`evict_expired`. The lock is held
/// for map bookkeeping only; `recent` sorts its snapshot after releasing
/// it.
#[derive(Debug, Default)]
pub struct InMemoryWebhookStore {
    events: RwLock<HashMap<EventId, StoredEntry>>,
    next_seq: AtomicU64,
}

impl InMemoryWebhookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.read().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WebhookStore for InMemoryWebhookStore {
    fn put(&self, event: WebhookEvent) -> Result<(), StoreError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut events = self.events.write().map_err(|_| StoreError::Poisoned)?;
        events.insert(
            event.id(),
            StoredEntry {
                seq,
                event: Arc::new(event),
            },
        );
        Ok(())
    }

    fn recent(
        &self,
        retention: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<Arc<WebhookEvent>>, StoreError> {
        let cutoff = now - retention;

        let mut live: Vec<StoredEntry> = {
            let events = self.events.read().map_err(|_| StoreError::Poisoned)?;
            events
                .values()
                .filter(|entry| entry.event.received_at() >= cutoff)
                .cloned()
                .collect()
        };

        live.sort_by(|a, b| {
            b.event
                .received_at()
                .cmp(&a.event.received_at())
                .then(b.seq.cmp(&a.seq))
        });

        Ok(live.into_iter().map(|entry| entry.event).collect())
    }

    fn evict_expired(&self, retention: Duration, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let cutoff = now - retention;
        let mut events = self.events.write().map_err(|_| StoreError::Poisoned)?;
        let before = events.len();
        events.retain(|_, entry| entry.event.received_at() >= cutoff);
        Ok(before - events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hooksink_core::InboundDelivery;

    fn event_at(received_at: DateTime<Utc>, marker: &str) -> WebhookEvent {
        WebhookEvent::from_delivery(
            InboundDelivery {
                body: marker.as_bytes().to_vec(),
                ..InboundDelivery::default()
            },
            received_at,
        )
    }

    #[test]
    fn recent_orders_most_recent_first() {
        let store = InMemoryWebhookStore::new();
        let now = Utc::now();

        store.put(event_at(now - Duration::minutes(30), "old")).unwrap();
        store.put(event_at(now - Duration::minutes(5), "newer")).unwrap();
        store.put(event_at(now - Duration::minutes(15), "middle")).unwrap();

        let recent = store.recent(Duration::hours(1), now).unwrap();
        let bodies: Vec<&str> = recent.iter().map(|e| e.raw_body()).collect();
        assert_eq!(bodies, ["newer", "middle", "old"]);
    }

    #[test]
    fn recent_breaks_timestamp_ties_by_insertion_order() {
        let store = InMemoryWebhookStore::new();
        let now = Utc::now();
        let instant = now - Duration::minutes(1);

        store.put(event_at(instant, "first")).unwrap();
        store.put(event_at(instant, "second")).unwrap();
        store.put(event_at(instant, "third")).unwrap();

        let recent = store.recent(Duration::hours(1), now).unwrap();
        let bodies: Vec<&str> = recent.iter().map(|e| e.raw_body()).collect();
        assert_eq!(bodies, ["third", "second", "first"]);
    }

    #[test]
    fn recent_excludes_events_outside_the_window() {
        let store = InMemoryWebhookStore::new();
        let now = Utc::now();

        store.put(event_at(now - Duration::hours(2), "expired")).unwrap();
        store.put(event_at(now - Duration::hours(1), "boundary")).unwrap();
        store.put(event_at(now - Duration::minutes(10), "live")).unwrap();

        let recent = store.recent(Duration::hours(1), now).unwrap();
        let bodies: Vec<&str> = recent.iter().map(|e| e.raw_body()).collect();
        // Events exactly at the cutoff are still within the window.
        assert_eq!(bodies, ["live", "boundary"]);
    }

    #[test]
    fn recent_is_empty_when_nothing_qualifies() {
        let store = InMemoryWebhookStore::new();
        let now = Utc::now();
        store.put(event_at(now - Duration::hours(3), "expired")).unwrap();

        assert!(store.recent(Duration::hours(1), now).unwrap().is_empty());
    }

    #[test]
    fn put_replaces_by_id() {
        let store = InMemoryWebhookStore::new();
        let now = Utc::now();
        let event = event_at(now, "payload");

        store.put(event.clone()).unwrap();
        store.put(event).unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn evict_expired_removes_only_expired_and_reports_count() {
        let store = InMemoryWebhookStore::new();
        let now = Utc::now();

        store.put(event_at(now - Duration::hours(2), "expired-a")).unwrap();
        store.put(event_at(now - Duration::hours(2), "expired-b")).unwrap();
        store.put(event_at(now - Duration::minutes(10), "live")).unwrap();

        let removed = store.evict_expired(Duration::hours(1), now).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);

        let recent = store.recent(Duration::hours(1), now).unwrap();
        assert_eq!(recent[0].raw_body(), "live");
    }

    #[test]
    fn evict_expired_is_idempotent() {
        let store = InMemoryWebhookStore::new();
        let now = Utc::now();
        store.put(event_at(now - Duration::hours(2), "expired")).unwrap();

        assert_eq!(store.evict_expired(Duration::hours(1), now).unwrap(), 1);
        assert_eq!(store.evict_expired(Duration::hours(1), now).unwrap(), 0);
    }

    #[test]
    fn concurrent_puts_and_evictions_stay_consistent() {
        let store = Arc::new(InMemoryWebhookStore::new());
        let now = Utc::now();

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let age = Duration::minutes(if i % 2 == 0 { 90 } else { 5 });
                        store.put(event_at(now - age, &format!("w{w}-{i}"))).unwrap();
                    }
                })
            })
            .collect();

        let sweeper = {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..20 {
                    store.evict_expired(Duration::hours(1), now).unwrap();
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        sweeper.join().unwrap();

        // A final eviction leaves exactly the live half behind.
        store.evict_expired(Duration::hours(1), now).unwrap();
        assert_eq!(store.len(), 100);
        assert_eq!(store.recent(Duration::hours(1), now).unwrap().len(), 100);
    }
}
