//! Topic registry
//!
//! Maps each topic name to the ordered list of subscriber handles registered
//! under it. The map is sharded (`DashMap`), so operations on different
//! topics never contend; operations on the same topic are serialized by the
//! shard lock.
//!
//! `get`/`put` give plain snapshot-and-replace access with last-writer-wins
//! semantics. The broker itself only uses `subscribe` and `broadcast`, which
//! perform their read-modify-write under the key's lock so concurrent
//! subscribes and publishes on one topic cannot lose each other's updates.
//!
//! Topics are created on first subscription and never removed.

use axum::extract::ws::Message;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::client::Client;

/// Decides when a subscriber whose writes fail is dropped from its topic.
///
/// Eviction only ever happens as a side effect of a failed write. There is
/// no liveness probe, so a subscriber that went away is noticed by the next
/// publish to its topic at the earliest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Keep a subscriber through one failed write and evict it on the
    /// second consecutive one. A closed connection therefore stays counted
    /// for one publish cycle and is gone after the next.
    #[default]
    Deferred,
    /// Evict on the first failed write.
    Immediate,
}

impl EvictionPolicy {
    /// Consecutive failed writes a subscriber survives.
    pub fn tolerated_failures(self) -> u8 {
        match self {
            EvictionPolicy::Deferred => 1,
            EvictionPolicy::Immediate => 0,
        }
    }
}

/// Outcome of one broadcast pass over a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Writes that succeeded.
    pub delivered: usize,
    /// Writes that failed but whose subscriber was kept.
    pub retained: usize,
    /// Subscribers removed by this pass.
    pub evicted: usize,
}

impl BroadcastReport {
    /// Subscribers left under the topic after the pass.
    pub fn remaining(&self) -> usize {
        self.delivered + self.retained
    }
}

#[derive(Debug, Default)]
pub struct TopicRegistry {
    topics: DashMap<String, Vec<Client>>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the handles stored for `topic`, or `None` if
    /// nobody ever subscribed to it.
    pub fn get(&self, topic: &str) -> Option<Vec<Client>> {
        self.topics.get(topic).map(|entry| entry.value().clone())
    }

    /// Replaces the handles stored for `topic`, creating it if needed.
    ///
    /// No merge happens: of two racing `put`s on the same topic, the later
    /// one wins.
    pub fn put(&self, topic: &str, clients: Vec<Client>) {
        self.topics.insert(topic.to_string(), clients);
    }

    /// Appends `client` to the handles of `topic`, creating the topic if
    /// needed, and returns the new subscriber count.
    ///
    /// Handles are not deduplicated.
    pub fn subscribe(&self, topic: &str, client: Client) -> usize {
        let mut entry = self.topics.entry(topic.to_string()).or_default();
        entry.push(client);
        entry.len()
    }

    /// Writes `message` to every handle of `topic` in stored order and
    /// writes back the handles that survive under `policy`.
    ///
    /// Returns `None` if the topic does not exist. A failed write never
    /// stops delivery to the remaining handles.
    pub fn broadcast(
        &self,
        topic: &str,
        message: &Message,
        policy: EvictionPolicy,
    ) -> Option<BroadcastReport> {
        let mut entry = self.topics.get_mut(topic)?;
        let clients = std::mem::take(entry.value_mut());
        let mut surviving = Vec::with_capacity(clients.len());
        let mut report = BroadcastReport::default();

        for mut client in clients {
            match client.deliver(message.clone()) {
                Ok(()) => {
                    debug!("Delivered to {} on {}", client.id, topic);
                    report.delivered += 1;
                    surviving.push(client);
                }
                Err(e) if client.failed_writes() <= policy.tolerated_failures() => {
                    warn!("Failed to send to {} on {}: {}, keeping it", client.id, topic, e);
                    report.retained += 1;
                    surviving.push(client);
                }
                Err(e) => {
                    warn!("Failed to send to {} on {}: {}, evicting it", client.id, topic, e);
                    report.evicted += 1;
                }
            }
        }

        *entry.value_mut() = surviving;
        Some(report)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of handles stored for `topic`; `0` for unknown topics.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, |entry| entry.len())
    }

    /// Names of every topic created so far, in no particular order.
    pub fn topics(&self) -> Vec<String> {
        self.topics.iter().map(|entry| entry.key().clone()).collect()
    }
}
