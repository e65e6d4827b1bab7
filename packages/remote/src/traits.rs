use async_trait::async_trait;
use common::{Document, Fields};
use tokio::sync::mpsc;

use crate::error::RemoteError;
use crate::query::Query;

/// The complete current result set for a query at one point in time.
///
/// Every push replaces the previous snapshot wholesale; there are no diffs
/// to merge.
pub type Snapshot = Vec<Document>;

/// A standing subscription to one query.
///
/// Dropping the subscription closes it; the backend prunes the channel on
/// the next push. At most one subscription exists per view instance.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Snapshot>,
}

impl Subscription {
    pub fn new(rx: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// Next full-result-set push, in server-arrival order. `None` means the
    /// backend closed the subscription.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }
}

/// The hosted document-database capability.
///
/// Collections are shared, multi-writer, schema-less; every write is an
/// independent last-write-wins operation. Typed validation happens in the
/// caller, at the document boundary.
#[async_trait]
pub trait Collections: Send + Sync {
    /// Open a standing subscription. The current result set is pushed
    /// promptly after open, then again after every affecting change.
    async fn subscribe(&self, query: Query) -> Result<Subscription, RemoteError>;

    /// One-shot evaluation of a query.
    async fn fetch(&self, query: Query) -> Result<Snapshot, RemoteError>;

    /// Append one document; returns the generated id. Server-timestamp
    /// placeholders in `fields` are replaced with backend time.
    async fn add_record(&self, collection: &str, fields: Fields) -> Result<String, RemoteError>;

    /// Merge `fields` into an existing document, field by field.
    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), RemoteError>;

    /// Delete a document. Deleting an absent document succeeds.
    async fn delete_record(&self, collection: &str, id: &str) -> Result<(), RemoteError>;

    /// Fetch one document by id.
    async fn get_one(&self, collection: &str, id: &str) -> Result<Option<Document>, RemoteError>;
}
