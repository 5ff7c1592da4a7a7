//! Broker engine
//!
//! Ties the topic registry to the two request operations:
//! - `subscribe` registers a connection's handle under a topic
//! - `publish` broadcasts a validated payload to a topic and prunes
//!   subscribers according to the configured [`EvictionPolicy`]
//!
//! The broker is shared as `Arc<Broker>` by every connection task. It holds
//! no lock of its own; all shared state lives in the registry.

use tracing::info;

use crate::broker::message::Payload;
use crate::broker::registry::{BroadcastReport, EvictionPolicy, TopicRegistry};
use crate::client::Client;
use crate::utils::error::InvalidRequest;

#[derive(Debug, Default)]
pub struct Broker {
    registry: TopicRegistry,
    eviction: EvictionPolicy,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eviction(eviction: EvictionPolicy) -> Self {
        Self {
            registry: TopicRegistry::new(),
            eviction,
        }
    }

    pub fn registry(&self) -> &TopicRegistry {
        &self.registry
    }

    pub fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    /// Registers `client` under `topic`. Returns the topic's subscriber count.
    pub fn subscribe(&self, topic: &str, client: Client) -> usize {
        let id = client.id.clone();
        let count = self.registry.subscribe(topic, client);
        info!("{id} subscribed to {topic} ({count} subscriber(s))");
        count
    }

    /// Broadcasts `payload` to every subscriber of `topic`.
    ///
    /// Succeeds as long as the topic exists, even if no subscriber received
    /// the message.
    pub fn publish(&self, topic: &str, payload: &Payload) -> Result<BroadcastReport, InvalidRequest> {
        let report = self
            .registry
            .broadcast(topic, &payload.to_message(), self.eviction)
            .ok_or_else(|| InvalidRequest::UnknownTopic(topic.to_string()))?;

        info!(
            "Published to {topic}: {} delivered, {} failed, {} evicted",
            report.delivered, report.retained, report.evicted
        );
        Ok(report)
    }
}
