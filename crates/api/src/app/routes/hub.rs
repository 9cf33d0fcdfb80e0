//! WebSocket endpoint for real-time webhook notifications.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Extension, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};

use hooksink_realtime::{ClientMessage, ServerMessage, WebhookHub};

use crate::app::services::AppServices;

/// GET /webhookhub
pub async fn upgrade(
    ws: WebSocketUpgrade,
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    let hub = services.hub().clone();
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: Arc<WebhookHub>) {
    let (mut sender, mut receiver) = socket.split();

    let (conn_id, mut rx) = hub.register();
    tracing::info!(connection = %conn_id, "client connected");

    // Forward hub messages to the socket until either side goes away.
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(_) => continue,
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(frame)) = receiver.next().await {
        match frame {
            Message::Text(text) => {
                let Ok(message) = serde_json::from_str::<ClientMessage>(&text) else {
                    continue;
                };
                match message {
                    ClientMessage::JoinGroup { group } => {
                        hub.join_group(conn_id, &group);
                        tracing::info!(connection = %conn_id, group = %group, "client joined group");
                    }
                    ClientMessage::LeaveGroup { group } => {
                        hub.leave_group(conn_id, &group);
                        tracing::info!(connection = %conn_id, group = %group, "client left group");
                    }
                    ClientMessage::Ping => hub.send_to(conn_id, ServerMessage::Pong),
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    // Release the registration promptly so dead subscriptions never pile up.
    hub.unregister(conn_id);
    send_task.abort();
    tracing::info!(connection = %conn_id, "client disconnected");
}
