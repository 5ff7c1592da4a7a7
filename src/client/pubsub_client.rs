use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::utils::error::DeliveryError;

/// Represents a subscriber connection registered under a topic.
///
/// The broker never touches the socket directly: writes are enqueued on
/// `sender` and the connection task forwards them. Once that task ends the
/// receiving half is gone and every further write fails.
#[derive(Debug, Clone)]
pub struct Client {
    /// Unique identifier for the client, used in logs.
    pub id: String,

    /// Channel to send WebSocket messages to the client.
    pub sender: UnboundedSender<Message>,

    /// Consecutive writes that failed since the last successful one.
    failed_writes: u8,
}

impl Client {
    pub fn new(sender: UnboundedSender<Message>) -> Self {
        Self {
            id: format!("client-{}", Uuid::new_v4()),
            sender,
            failed_writes: 0,
        }
    }

    /// Enqueues `message` for the connection.
    pub fn deliver(&mut self, message: Message) -> Result<(), DeliveryError> {
        match self.sender.send(message) {
            Ok(()) => {
                self.failed_writes = 0;
                Ok(())
            }
            Err(_) => {
                self.failed_writes = self.failed_writes.saturating_add(1);
                Err(DeliveryError::Closed)
            }
        }
    }

    pub fn failed_writes(&self) -> u8 {
        self.failed_writes
    }

    /// True once the connection task has stopped accepting messages.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
