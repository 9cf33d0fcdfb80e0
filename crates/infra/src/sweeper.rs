//! Periodic eviction of expired events.

use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::RetentionConfig;
use crate::store::{StoreError, WebhookStore};

/// Handle to a running sweeper.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl SweeperHandle {
    /// Request shutdown and wait for the sweep loop to exit.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Background retention sweeper.
///
/// Ticks on a fixed interval, evicting everything older than the
/// retention window. A sweep that finds nothing is a cheap no-op; a sweep
/// that fails is logged and the next tick proceeds normally.
#[derive(Debug)]
pub struct RetentionSweeper<S> {
    store: S,
    config: RetentionConfig,
}

impl<S> RetentionSweeper<S>
where
    S: WebhookStore + 'static,
{
    pub fn new(store: S, config: RetentionConfig) -> Self {
        Self { store, config }
    }

    /// Run one sweep immediately.
    pub fn sweep_once(&self) -> Result<usize, StoreError> {
        self.store.evict_expired(self.config.retention, Utc::now())
    }

    /// Spawn the sweep loop in a named background thread.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let join = thread::Builder::new()
            .name("retention-sweeper".to_string())
            .spawn(move || sweep_loop(self, shutdown_rx))
            .expect("failed to spawn retention sweeper thread");

        SweeperHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        }
    }
}

fn sweep_loop<S: WebhookStore + 'static>(sweeper: RetentionSweeper<S>, shutdown_rx: mpsc::Receiver<()>) {
    info!(
        interval_secs = sweeper.config.sweep_interval.as_secs(),
        retention_secs = sweeper.config.retention.num_seconds(),
        "retention sweeper started"
    );

    loop {
        // The shutdown channel doubles as the tick timer.
        match shutdown_rx.recv_timeout(sweeper.config.sweep_interval) {
            Err(mpsc::RecvTimeoutError::Timeout) => match sweeper.sweep_once() {
                Ok(0) => debug!("sweep found nothing expired"),
                Ok(count) => info!(count, "evicted expired webhooks"),
                Err(e) => warn!(error = %e, "sweep failed"),
            },
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("retention sweeper stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration as StdDuration, Instant};

    use chrono::Duration;

    use crate::store::InMemoryWebhookStore;
    use hooksink_core::{InboundDelivery, WebhookEvent};

    fn expired_event() -> WebhookEvent {
        WebhookEvent::from_delivery(InboundDelivery::default(), Utc::now() - Duration::hours(2))
    }

    fn tight_config() -> RetentionConfig {
        RetentionConfig {
            retention: Duration::hours(1),
            sweep_interval: StdDuration::from_millis(10),
        }
    }

    #[test]
    fn sweep_once_evicts_expired_events() {
        let store = Arc::new(InMemoryWebhookStore::new());
        store.put(expired_event()).unwrap();

        let sweeper = RetentionSweeper::new(store.clone(), tight_config());
        assert_eq!(sweeper.sweep_once().unwrap(), 1);
        assert_eq!(sweeper.sweep_once().unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn spawned_sweeper_evicts_within_a_few_intervals() {
        let store = Arc::new(InMemoryWebhookStore::new());
        store.put(expired_event()).unwrap();

        let handle = RetentionSweeper::new(store.clone(), tight_config()).spawn();

        let deadline = Instant::now() + StdDuration::from_secs(2);
        while !store.is_empty() && Instant::now() < deadline {
            thread::sleep(StdDuration::from_millis(5));
        }

        handle.shutdown();
        assert!(store.is_empty(), "expired event should be swept");
    }

    #[test]
    fn shutdown_stops_the_loop_promptly() {
        let store = Arc::new(InMemoryWebhookStore::new());
        let config = RetentionConfig {
            retention: Duration::hours(1),
            // Long interval: shutdown must not wait for a tick.
            sweep_interval: StdDuration::from_secs(60),
        };

        let handle = RetentionSweeper::new(store, config).spawn();
        let started = Instant::now();
        handle.shutdown();
        assert!(started.elapsed() < StdDuration::from_secs(5));
    }
}
