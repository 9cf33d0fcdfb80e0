//! Real-time fan-out: observer registry, named groups, wire protocol.

pub mod hub;
pub mod message;
pub mod sink;

pub use hub::{ConnectionId, WebhookHub};
pub use message::{ClientMessage, ServerMessage};
pub use sink::EventSink;
