use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use common::document::is_server_timestamp;
use common::{Document, Fields};
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::RemoteError;
use crate::query::Query;
use crate::traits::{Collections, Snapshot, Subscription};

#[derive(Clone)]
struct Entry {
    id: String,
    fields: Fields,
}

struct Subscriber {
    query: Query,
    tx: mpsc::UnboundedSender<Snapshot>,
}

/// In-memory implementation of the remote collection capability.
///
/// Matches the hosted service's observable behavior: schema-less documents,
/// generated ids, server-assigned timestamps, and full-result-set pushes to
/// every open subscription after each affecting write. Used by tests and
/// local development.
#[derive(Default)]
pub struct MemoryCollections {
    collections: DashMap<String, Vec<Entry>>,
    subscribers: DashMap<u64, Subscriber>,
    next_subscriber: AtomicU64,
    /// Serializes snapshot evaluation and delivery, so a write can never
    /// slip between a subscription's registration and its initial push.
    publish: Mutex<()>,
}

impl MemoryCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions, after pruning closed ones.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.retain(|_, sub| !sub.tx.is_closed());
        self.subscribers.len()
    }

    fn evaluate(&self, query: &Query) -> Snapshot {
        let mut entries: Vec<Entry> = self
            .collections
            .get(&query.collection)
            .map(|c| c.iter().filter(|e| query.matches(&e.fields)).cloned().collect())
            .unwrap_or_default();

        entries.sort_by(|a, b| query.compare(&a.fields, &b.fields));
        if let Some(limit) = query.limit {
            entries.truncate(limit);
        }

        entries
            .into_iter()
            .map(|e| Document::new(e.id, e.fields))
            .collect()
    }

    fn publish_guard(&self) -> MutexGuard<'_, ()> {
        match self.publish.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Push the recomputed result set to every subscription on `collection`.
    fn notify(&self, collection: &str) {
        let _guard = self.publish_guard();
        let mut closed = Vec::new();
        for sub in self.subscribers.iter() {
            if sub.query.collection != collection {
                continue;
            }
            let snapshot = self.evaluate(&sub.query);
            if sub.tx.send(snapshot).is_err() {
                closed.push(*sub.key());
            }
        }
        for id in closed {
            self.subscribers.remove(&id);
        }
    }
}

/// Replace server-timestamp placeholders with the backend clock.
fn resolve_server_timestamps(fields: &mut Fields) {
    let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
    for value in fields.values_mut() {
        if is_server_timestamp(value) {
            *value = now.clone();
        }
    }
}

#[async_trait]
impl Collections for MemoryCollections {
    async fn subscribe(&self, query: Query) -> Result<Subscription, RemoteError> {
        let (tx, rx) = mpsc::unbounded_channel();
        // Registration, initial snapshot, and send happen under the publish
        // guard: a concurrent write either lands before the snapshot or
        // produces its own push afterwards, never neither.
        let _guard = self.publish_guard();
        let id = self.next_subscriber.fetch_add(1, Ordering::SeqCst);
        let initial = self.evaluate(&query);
        tx.send(initial).map_err(|_| RemoteError::SubscriptionClosed)?;
        self.subscribers.insert(id, Subscriber { query, tx });
        debug!(subscriber = id, "Opened subscription");
        Ok(Subscription::new(rx))
    }

    async fn fetch(&self, query: Query) -> Result<Snapshot, RemoteError> {
        Ok(self.evaluate(&query))
    }

    async fn add_record(&self, collection: &str, mut fields: Fields) -> Result<String, RemoteError> {
        resolve_server_timestamps(&mut fields);
        let id = uuid::Uuid::now_v7().to_string();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(Entry {
                id: id.clone(),
                fields,
            });
        self.notify(collection);
        Ok(id)
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        mut fields: Fields,
    ) -> Result<(), RemoteError> {
        resolve_server_timestamps(&mut fields);
        let updated = {
            let mut entries =
                self.collections
                    .get_mut(collection)
                    .ok_or_else(|| RemoteError::NotFound {
                        collection: collection.into(),
                        id: id.into(),
                    })?;
            match entries.iter_mut().find(|e| e.id == id) {
                Some(entry) => {
                    entry.fields.append(&mut fields);
                    true
                }
                None => false,
            }
        };
        if !updated {
            return Err(RemoteError::NotFound {
                collection: collection.into(),
                id: id.into(),
            });
        }
        self.notify(collection);
        Ok(())
    }

    async fn delete_record(&self, collection: &str, id: &str) -> Result<(), RemoteError> {
        let removed = match self.collections.get_mut(collection) {
            Some(mut entries) => {
                let before = entries.len();
                entries.retain(|e| e.id != id);
                entries.len() != before
            }
            None => false,
        };
        if removed {
            self.notify(collection);
        }
        Ok(())
    }

    async fn get_one(&self, collection: &str, id: &str) -> Result<Option<Document>, RemoteError> {
        Ok(self.collections.get(collection).and_then(|entries| {
            entries
                .iter()
                .find(|e| e.id == id)
                .map(|e| Document::new(e.id.clone(), e.fields.clone()))
        }))
    }
}
