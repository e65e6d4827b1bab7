use std::sync::Arc;

use remote::{Collections, Query, Snapshot};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use common::Record;

/// What a list screen currently has to render.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<R> {
    /// No snapshot received yet.
    Loading,
    /// Latest snapshot, possibly empty, in server order.
    Ready(Vec<R>),
    /// The subscription failed; terminal until the view is reopened.
    Error(String),
}

impl<R> ViewState<R> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn rows(&self) -> &[R] {
        match self {
            Self::Ready(rows) => rows,
            _ => &[],
        }
    }
}

/// An always-current ordered list of records matching a query.
///
/// Owns the subscription plumbing: a consumer task holds the subscription
/// and replaces the local snapshot wholesale on every push. Dropping the
/// view aborts the task, which closes the subscription, including on the
/// error path. A failed subscription never retries by itself.
pub struct LiveView<R: Record> {
    collections: Arc<dyn Collections>,
    rx: watch::Receiver<ViewState<R>>,
    task: JoinHandle<()>,
}

impl<R: Record + Clone> LiveView<R> {
    pub fn open(collections: Arc<dyn Collections>, query: Query) -> Self {
        let (tx, rx) = watch::channel(ViewState::Loading);
        let task = tokio::spawn(consume(collections.clone(), query, tx));
        Self {
            collections,
            rx,
            task,
        }
    }

    /// Replace the query. The old subscription is torn down before the new
    /// one opens, so at most one is ever live for this view.
    pub fn requery(&mut self, query: Query) {
        self.task.abort();
        let (tx, rx) = watch::channel(ViewState::Loading);
        self.task = tokio::spawn(consume(self.collections.clone(), query, tx));
        self.rx = rx;
    }

    pub fn state(&self) -> ViewState<R> {
        self.rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<ViewState<R>> {
        self.rx.clone()
    }

    /// Wait until the view leaves `Loading`; returns the snapshot or the
    /// terminal error message.
    pub async fn ready(&self) -> Result<Vec<R>, String> {
        let mut rx = self.rx.clone();
        loop {
            match &*rx.borrow() {
                ViewState::Ready(rows) => return Ok(rows.clone()),
                ViewState::Error(message) => return Err(message.clone()),
                ViewState::Loading => {}
            }
            if rx.changed().await.is_err() {
                return Err("view closed".into());
            }
        }
    }

    /// Wait for the next push after the current state.
    pub async fn next_change(&self) -> ViewState<R> {
        let mut rx = self.rx.clone();
        // The clone's seen-version lags behind the channel; mark the value
        // current at call time as seen so only a genuinely new push wakes us.
        rx.mark_unchanged();
        if rx.changed().await.is_err() {
            return ViewState::Error("view closed".into());
        }
        let state = rx.borrow_and_update().clone();
        state
    }
}

impl<R: Record> Drop for LiveView<R> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn consume<R: Record>(
    collections: Arc<dyn Collections>,
    query: Query,
    tx: watch::Sender<ViewState<R>>,
) {
    let mut subscription = match collections.subscribe(query).await {
        Ok(sub) => sub,
        Err(e) => {
            error!(collection = R::COLLECTION, error = %e, "Failed to open subscription");
            let _ = tx.send(ViewState::Error(e.to_string()));
            return;
        }
    };

    while let Some(snapshot) = subscription.next().await {
        let rows = decode_snapshot::<R>(snapshot);
        if tx.send(ViewState::Ready(rows)).is_err() {
            // View dropped; the subscription closes with us.
            return;
        }
    }

    // The backend closed the stream underneath a live view. Terminal; only a
    // remount resubscribes.
    error!(collection = R::COLLECTION, "Subscription dropped");
    let _ = tx.send(ViewState::Error("subscription closed".into()));
}

/// Decode a pushed snapshot, preserving server order. Documents that fail
/// typed validation are skipped rather than poisoning the whole snapshot.
fn decode_snapshot<R: Record>(snapshot: Snapshot) -> Vec<R> {
    let mut rows = Vec::with_capacity(snapshot.len());
    for doc in &snapshot {
        match doc.decode::<R>() {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!(collection = R::COLLECTION, error = %e, "Skipping malformed document");
            }
        }
    }
    rows
}
