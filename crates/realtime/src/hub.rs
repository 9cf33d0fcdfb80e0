//! Connected-observer registry and broadcast fan-out.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use hooksink_core::WebhookEvent;

use crate::message::ServerMessage;
use crate::sink::EventSink;

/// Identity of one observer connection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl core::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug)]
struct Observer {
    tx: UnboundedSender<ServerMessage>,
}

/// Fan-out hub.
///
/// - Best-effort delivery, at most once per observer per publish
/// - A dead observer is pruned by the publish that discovers it
/// - Group membership is tracked separately from the broadcast-to-all path
#[derive(Debug, Default)]
pub struct WebhookHub {
    observers: RwLock<HashMap<ConnectionId, Observer>>,
    groups: RwLock<HashMap<String, HashSet<ConnectionId>>>,
}

impl WebhookHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer. It receives every message published after
    /// this call returns; messages already in flight may be missed.
    pub fn register(&self) -> (ConnectionId, UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::new();

        // If the lock is poisoned the observer is still handed a receiver;
        // it just won't see messages until the process restarts.
        if let Ok(mut observers) = self.observers.write() {
            observers.insert(id, Observer { tx });
        }

        (id, rx)
    }

    /// Remove an observer and every group membership it holds.
    pub fn unregister(&self, id: ConnectionId) {
        if let Ok(mut observers) = self.observers.write() {
            observers.remove(&id);
        }
        if let Ok(mut groups) = self.groups.write() {
            for members in groups.values_mut() {
                members.remove(&id);
            }
            groups.retain(|_, members| !members.is_empty());
        }
    }

    /// Add an observer to a named group. Takes effect for sends starting
    /// after this call completes. Unknown connections are ignored; the
    /// socket may already be gone.
    pub fn join_group(&self, id: ConnectionId, group: &str) {
        let known = self
            .observers
            .read()
            .map(|observers| observers.contains_key(&id))
            .unwrap_or(false);
        if !known {
            return;
        }

        if let Ok(mut groups) = self.groups.write() {
            groups.entry(group.to_string()).or_default().insert(id);
        }
    }

    pub fn leave_group(&self, id: ConnectionId, group: &str) {
        if let Ok(mut groups) = self.groups.write() {
            if let Some(members) = groups.get_mut(group) {
                members.remove(&id);
                if members.is_empty() {
                    groups.remove(group);
                }
            }
        }
    }

    /// Deliver a message to every observer regardless of group, dropping
    /// any observer whose channel has closed. Never blocks on a slow or
    /// dead receiver.
    pub fn broadcast(&self, message: ServerMessage) {
        let Ok(mut observers) = self.observers.write() else {
            return;
        };
        observers.retain(|_, observer| observer.tx.send(message.clone()).is_ok());
    }

    /// Deliver a message to one group's members only.
    pub fn send_to_group(&self, group: &str, message: ServerMessage) {
        let members = match self.groups.read() {
            Ok(groups) => groups.get(group).cloned().unwrap_or_default(),
            Err(_) => return,
        };

        let Ok(observers) = self.observers.read() else {
            return;
        };
        for id in members {
            if let Some(observer) = observers.get(&id) {
                let _ = observer.tx.send(message.clone());
            }
        }
    }

    /// Direct send to a single observer (used for `pong` replies).
    pub fn send_to(&self, id: ConnectionId, message: ServerMessage) {
        if let Ok(observers) = self.observers.read() {
            if let Some(observer) = observers.get(&id) {
                let _ = observer.tx.send(message);
            }
        }
    }

    pub fn connection_count(&self) -> usize {
        self.observers.read().map(|observers| observers.len()).unwrap_or(0)
    }

    /// Whether the registry is usable. Only lock poisoning degrades the hub.
    pub fn is_healthy(&self) -> bool {
        self.observers.read().is_ok() && self.groups.read().is_ok()
    }
}

impl EventSink for WebhookHub {
    fn publish(&self, event: &WebhookEvent) {
        self.broadcast(ServerMessage::WebhookReceived(event.clone()));
    }
}
