//! Editor message channel
//!
//! In-page message bridge between a host editor and widget instances.
//! Posting only queues; messages fan out to the topic's subscribers when
//! the runtime drains the channel.

use crate::OwnerId;
use std::collections::HashMap;

/// One message addressed to one subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub subscriber: OwnerId,
    pub topic: String,
    pub data: String,
}

/// Host-provided publish/subscribe capability
pub trait MessageChannel: std::fmt::Debug {
    /// Subscribe `owner` to `topic`. Returns false if already subscribed.
    fn subscribe(&mut self, topic: &str, owner: OwnerId) -> bool;

    /// Drop every subscription of `owner`
    fn unsubscribe_owner(&mut self, owner: OwnerId);

    /// Queue a message on `topic`
    fn post(&mut self, topic: &str, data: &str);

    /// Take queued messages, expanded per subscriber
    fn drain(&mut self) -> Vec<Delivery>;

    /// Number of subscribers on `topic`
    fn subscriber_count(&self, topic: &str) -> usize;
}

/// In-memory channel
#[derive(Debug, Default)]
pub struct EditorChannel {
    subscriptions: HashMap<String, Vec<OwnerId>>,
    pending: Vec<(String, String)>,
}

impl EditorChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageChannel for EditorChannel {
    fn subscribe(&mut self, topic: &str, owner: OwnerId) -> bool {
        let subscribers = self.subscriptions.entry(topic.to_string()).or_default();
        if subscribers.contains(&owner) {
            return false;
        }
        subscribers.push(owner);
        true
    }

    fn unsubscribe_owner(&mut self, owner: OwnerId) {
        for subscribers in self.subscriptions.values_mut() {
            subscribers.retain(|&id| id != owner);
        }
    }

    fn post(&mut self, topic: &str, data: &str) {
        self.pending.push((topic.to_string(), data.to_string()));
    }

    fn drain(&mut self) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        for (topic, data) in std::mem::take(&mut self.pending) {
            let Some(subscribers) = self.subscriptions.get(&topic) else {
                tracing::trace!("no subscribers on {}", topic);
                continue;
            };
            deliveries.extend(subscribers.iter().map(|&subscriber| Delivery {
                subscriber,
                topic: topic.clone(),
                data: data.clone(),
            }));
        }
        deliveries
    }

    fn subscriber_count(&self, topic: &str) -> usize {
        self.subscriptions.get(topic).map_or(0, Vec::len)
    }
}
