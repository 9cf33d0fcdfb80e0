//! `hooksink-core` — domain model for received webhooks.
//!
//! This crate contains **pure domain** types (no transport or storage concerns).

pub mod error;
pub mod event;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use event::{InboundDelivery, WebhookEvent};
pub use id::EventId;
