//! Received webhook events and the inbound deliveries they are built from.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::id::EventId;

/// Media type assumed when a delivery does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A raw inbound delivery, as captured by the transport layer.
///
/// The body has already been read in full; nothing here borrows from the
/// request.
#[derive(Debug, Clone, Default)]
pub struct InboundDelivery {
    /// Best-effort network address of the caller.
    pub source_addr: Option<String>,
    /// Header name to ordered values, as received.
    pub headers: HashMap<String, Vec<String>>,
    /// Declared media type of the body, if any.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// One received webhook plus its metadata.
///
/// Immutable once constructed; only its membership in the store changes
/// (present or evicted). `received_at` is the server's capture time, never
/// anything the caller supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    id: EventId,
    received_at: DateTime<Utc>,
    source_addr: Option<String>,
    headers: HashMap<String, Vec<String>>,
    content_type: String,
    raw_body: String,
    parsed_body: Option<JsonValue>,
}

impl WebhookEvent {
    /// Build an event from a delivery, stamping identity and receive time.
    ///
    /// The body is decoded as JSON on a best-effort basis; a body that does
    /// not parse leaves `parsed_body` empty and is never an error. The raw
    /// text is always retained.
    pub fn from_delivery(delivery: InboundDelivery, received_at: DateTime<Utc>) -> Self {
        let parsed_body = serde_json::from_slice(&delivery.body).ok();
        let raw_body = String::from_utf8_lossy(&delivery.body).into_owned();

        Self {
            id: EventId::new(),
            received_at,
            source_addr: delivery.source_addr,
            headers: delivery.headers,
            content_type: delivery
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            raw_body,
            parsed_body,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn source_addr(&self) -> Option<&str> {
        self.source_addr.as_deref()
    }

    pub fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn parsed_body(&self) -> Option<&JsonValue> {
        self.parsed_body.as_ref()
    }
}
