//! Wire protocol for the real-time channel.

use serde::{Deserialize, Serialize};

use hooksink_core::WebhookEvent;

/// Server → client messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// One newly received webhook, full payload.
    #[serde(rename = "webhook.received")]
    WebhookReceived(WebhookEvent),
    Pong,
}

/// Client → server messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinGroup { group: String },
    LeaveGroup { group: String },
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hooksink_core::InboundDelivery;
    use serde_json::json;

    #[test]
    fn webhook_message_carries_the_event_payload() {
        let event = WebhookEvent::from_delivery(
            InboundDelivery {
                body: br#"{"x":1}"#.to_vec(),
                ..InboundDelivery::default()
            },
            Utc::now(),
        );

        let value = serde_json::to_value(ServerMessage::WebhookReceived(event)).unwrap();

        assert_eq!(value["type"], json!("webhook.received"));
        assert_eq!(value["data"]["parsedBody"], json!({"x": 1}));
    }

    #[test]
    fn client_messages_parse_from_tagged_json() {
        let msg: ClientMessage =
            serde_json::from_value(json!({"type": "join_group", "data": {"group": "deploys"}}))
                .unwrap();
        assert!(matches!(msg, ClientMessage::JoinGroup { group } if group == "deploys"));

        let msg: ClientMessage = serde_json::from_value(json!({"type": "ping"})).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }
}
