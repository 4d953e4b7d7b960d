//! Client event bus
//!
//! UI-facing signals from the request gateway, delivered over a broadcast
//! channel so any number of consumers (views, loggers) can subscribe.

use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// Events emitted by the request gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A user-visible notification
    Notice {
        level: NoticeLevel,
        message: String,
    },
    /// The session was torn down; the UI should navigate to the login view
    SessionExpired,
}

/// Broadcast bus for client events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ClientEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to client events
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.tx.subscribe()
    }

    /// Emit an event. Emission without subscribers is a no-op.
    pub fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }

    /// Emit a user-visible notice
    pub fn notice(&self, level: NoticeLevel, message: impl Into<String>) {
        self.emit(ClientEvent::Notice {
            level,
            message: message.into(),
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
