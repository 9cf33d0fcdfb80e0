//! Infrastructure: transient storage, ingestion pipeline, retention
//! sweeping, and configuration.

pub mod config;
pub mod ingest;
pub mod store;
pub mod sweeper;

pub use config::RetentionConfig;
pub use ingest::{IngestCoordinator, IngestError, Receipt};
pub use store::{InMemoryWebhookStore, StoreError, WebhookStore};
pub use sweeper::{RetentionSweeper, SweeperHandle};
